use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::assist::fallback::fallback_reply;
use crate::assist::prompts::{CHAT_PROMPT_TEMPLATE, CHAT_SYSTEM, SUGGEST_SYSTEM};
use crate::assist::snapshot::{load_snapshot, render_snapshot};
use crate::assist::suggest::{build_prompt, parse_suggestions, validate_field, validate_type};
use crate::errors::AppError;
use crate::models::account::Account;
use crate::profile::load_profile;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Deserialize)]
pub struct SuggestRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub field: Option<String>,
    #[serde(default)]
    pub context: Value,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// POST /ai/chat
///
/// Always 200 with a reply. Any failure along the way, snapshot load or
/// provider call, is absorbed into a locally selected canned reply.
pub async fn chat(State(state): State<AppState>, Json(body): Json<ChatRequest>) -> Json<ChatResponse> {
    let message = body.message.unwrap_or_default();
    if message.trim().is_empty() {
        return Json(ChatResponse {
            reply: "Ask me anything about the projects, experience, or skills on this site!"
                .to_string(),
        });
    }

    let reply = match generate_chat_reply(&state, &message).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Chat falling back to a canned reply: {e:#}");
            fallback_reply(&message)
        }
    };

    Json(ChatResponse { reply })
}

async fn generate_chat_reply(state: &AppState, message: &str) -> anyhow::Result<String> {
    let snapshot = load_snapshot(&state.db).await?;
    let prompt = CHAT_PROMPT_TEMPLATE
        .replace("{snapshot}", &render_snapshot(&snapshot))
        .replace("{message}", message);
    Ok(state.llm.generate(&prompt, CHAT_SYSTEM).await?)
}

/// POST /ai/suggest
///
/// Unlike chat, provider failures surface here: the dashboard shows the
/// error and the owner writes the field by hand.
pub async fn suggest(
    State(state): State<AppState>,
    account: Option<Extension<Account>>,
    Json(body): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let kind = validate_type(body.kind)?;
    let field = validate_field(body.field)?;

    let profile = match &account {
        Some(Extension(account)) => load_profile(&state.db, account.id).await?,
        None => None,
    };

    let prompt = build_prompt(&kind, &field, &body.context, profile.as_ref());
    let raw = state
        .llm
        .generate(&prompt, SUGGEST_SYSTEM)
        .await
        .map_err(|e| AppError::Suggestion(e.to_string()))?;

    Ok(Json(SuggestResponse {
        suggestions: parse_suggestions(&raw),
    }))
}
