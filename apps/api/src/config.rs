use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails fast if required variables are missing; optional
/// integrations (LLM, SMTP) degrade instead of blocking boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base URL uploads are served from. Falls back to `<endpoint>/<bucket>`.
    pub s3_public_url: Option<String>,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Absent key means the chat endpoint runs on canned fallbacks and
    /// suggestions report the service as unavailable.
    pub anthropic_api_key: Option<String>,
    /// Seed credentials for the admin account, used only when the accounts
    /// table is empty at startup.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub smtp: Option<SmtpConfig>,
    /// Comma-separated origin allow-list; unset means permissive CORS.
    pub cors_allowed_origins: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Outbound notification email settings. Only constructed when SMTP_HOST is
/// set; the remaining variables are required at that point.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender address on outgoing notifications.
    pub from_address: String,
    /// Site owner's inbox, where contact messages are forwarded.
    pub owner_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let smtp = match optional_env("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                username: require_env("SMTP_USERNAME")?,
                password: require_env("SMTP_PASSWORD")?,
                from_address: require_env("MAIL_FROM")?,
                owner_address: require_env("MAIL_TO")?,
            }),
            None => None,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_public_url: optional_env("S3_PUBLIC_URL"),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            admin_username: optional_env("ADMIN_USERNAME"),
            admin_password: optional_env("ADMIN_PASSWORD"),
            smtp,
            cors_allowed_origins: optional_env("CORS_ALLOWED_ORIGINS"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Public base URL that stored object keys are joined onto.
    pub fn media_base_url(&self) -> String {
        match &self.s3_public_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!(
                "{}/{}",
                self.s3_endpoint.trim_end_matches('/'),
                self.s3_bucket
            ),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and set-but-empty both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
