use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::mail::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Pluggable text provider. Production wires the Anthropic-backed
    /// `LlmClient`; tests substitute deterministic fakes.
    pub llm: Arc<dyn TextGenerator>,
    /// None when SMTP is not configured; message submission then skips the
    /// owner notification.
    pub mailer: Option<Arc<Mailer>>,
    pub config: Config,
}
