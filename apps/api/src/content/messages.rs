use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::content::{optional_text, require_text};
use crate::errors::AppError;
use crate::models::site::Message;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// POST /messages
///
/// Public contact-form submission. The owner notification email is
/// fire-and-forget: delivery failure is logged and the submission still
/// returns 201.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitMessage>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let name = require_text(body.name, "name")?;
    let email = require_text(body.email, "email")?;
    let text = require_text(body.message, "message")?;
    let subject = optional_text(body.subject);

    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, name, email, subject, body)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&name)
    .bind(&email)
    .bind(&subject)
    .bind(&text)
    .fetch_one(&state.db)
    .await?;

    if let Some(mailer) = state.mailer.clone() {
        let notification = message.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.notify_new_message(&notification).await {
                warn!(
                    "Owner notification for message {} failed: {e:#}",
                    notification.id
                );
            }
        });
    }

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /messages
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Message>>, AppError> {
    let messages = sqlx::query_as::<_, Message>("SELECT * FROM messages ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(messages))
}

/// PATCH /messages/:id — flips the read flag on.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    let message =
        sqlx::query_as::<_, Message>("UPDATE messages SET read = TRUE WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {id} not found")))?;
    Ok(Json(message))
}

/// DELETE /messages/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM messages WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Message {id} not found")));
    }
    Ok(Json(json!({ "message": "Message deleted" })))
}
