use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::site::ContactInfo;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// GET /contact
pub async fn get(State(state): State<AppState>) -> Result<Json<ContactInfo>, AppError> {
    let info = sqlx::query_as::<_, ContactInfo>(
        "SELECT name, email, phone, address, updated_at FROM contact_info WHERE id = 1",
    )
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Contact info has not been set yet".to_string()))?;
    Ok(Json(info))
}

/// PUT /contact
///
/// Update-or-create against the fixed singleton row. A single upsert, so
/// concurrent first writes converge on one row instead of racing a
/// find-then-insert.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateContact>,
) -> Result<Json<ContactInfo>, AppError> {
    let info = sqlx::query_as::<_, ContactInfo>(
        r#"
        INSERT INTO contact_info (id, name, email, phone, address, updated_at)
        VALUES (1, COALESCE($1, ''), COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), now())
        ON CONFLICT (id) DO UPDATE SET
            name = COALESCE($1, contact_info.name),
            email = COALESCE($2, contact_info.email),
            phone = COALESCE($3, contact_info.phone),
            address = COALESCE($4, contact_info.address),
            updated_at = now()
        RETURNING name, email, phone, address, updated_at
        "#,
    )
    .bind(body.name)
    .bind(body.email)
    .bind(body.phone)
    .bind(body.address)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(info))
}
