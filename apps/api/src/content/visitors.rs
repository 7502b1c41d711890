use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct VisitorCount {
    pub count: i64,
}

/// GET /visitors — 0 before the first increment, never 404s.
pub async fn get(State(state): State<AppState>) -> Result<Json<VisitorCount>, AppError> {
    let count: Option<i64> = sqlx::query_scalar("SELECT count FROM visitor_counter WHERE id = 1")
        .fetch_optional(&state.db)
        .await?;
    Ok(Json(VisitorCount {
        count: count.unwrap_or(0),
    }))
}

/// POST /visitors
///
/// Single-statement atomic increment. Creates the singleton on first call;
/// concurrent increments serialize on the row and none is lost.
pub async fn increment(State(state): State<AppState>) -> Result<Json<VisitorCount>, AppError> {
    let count: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO visitor_counter (id, count, last_visited)
        VALUES (1, 1, now())
        ON CONFLICT (id) DO UPDATE SET
            count = visitor_counter.count + 1,
            last_visited = now()
        RETURNING count
        "#,
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(VisitorCount { count }))
}
