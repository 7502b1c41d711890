use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::account::Account;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

#[derive(Deserialize)]
pub struct UpdateCredentialsRequest {
    pub current_password: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateCredentialsResponse {
    pub message: String,
    pub username: String,
}

/// POST /auth/login
///
/// Unknown usernames and wrong passwords produce the identical response, so
/// the endpoint cannot be probed for which accounts exist. The unknown-
/// username branch still burns a hash to keep its timing in the same range
/// as a real verification.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
        .bind(&body.username)
        .fetch_optional(&state.db)
        .await?;

    let account = match account {
        Some(account) => account,
        None => {
            let _ = hash_password(&body.password);
            return Err(AppError::Unauthorized("Invalid credentials"));
        }
    };

    if !verify_password(&body.password, &account.password_hash) {
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    let token = issue_token(&state.config.jwt_secret, account.id)?;
    info!("Login for account {}", account.id);

    Ok(Json(LoginResponse {
        id: account.id,
        username: account.username,
        token,
    }))
}

/// PUT /auth/update-credentials
///
/// Requires the current password again even though the caller already holds
/// a valid token. New username must be unique; new password replaces the
/// hash and the old one stops working on the next login.
pub async fn update_credentials(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Json(body): Json<UpdateCredentialsRequest>,
) -> Result<Json<UpdateCredentialsResponse>, AppError> {
    if !verify_password(&body.current_password, &account.password_hash) {
        return Err(AppError::Unauthorized("Current password is incorrect"));
    }

    let new_username = match body.username {
        Some(name) if !name.trim().is_empty() => {
            let name = name.trim().to_string();
            if name != account.username {
                let taken: Option<Uuid> =
                    sqlx::query_scalar("SELECT id FROM accounts WHERE username = $1 AND id <> $2")
                        .bind(&name)
                        .bind(account.id)
                        .fetch_optional(&state.db)
                        .await?;
                if taken.is_some() {
                    return Err(AppError::Conflict("Username is already taken".to_string()));
                }
            }
            name
        }
        _ => account.username.clone(),
    };

    let new_hash = match &body.password {
        Some(plain) if !plain.is_empty() => hash_password(plain)?,
        _ => account.password_hash.clone(),
    };

    sqlx::query(
        "UPDATE accounts SET username = $2, password_hash = $3, updated_at = now() WHERE id = $1",
    )
    .bind(account.id)
    .bind(&new_username)
    .bind(&new_hash)
    .execute(&state.db)
    .await?;

    info!("Credentials updated for account {}", account.id);

    Ok(Json(UpdateCredentialsResponse {
        message: "Credentials updated".to_string(),
        username: new_username,
    }))
}

/// Seeds the admin account when the accounts table is empty. Controlled by
/// ADMIN_USERNAME / ADMIN_PASSWORD; skipped with a warning when they are
/// unset.
pub async fn seed_admin_account(pool: &PgPool, config: &Config) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        warn!("No accounts exist and ADMIN_USERNAME/ADMIN_PASSWORD are unset; admin login is unavailable");
        return Ok(());
    };

    let hash = hash_password(password)?;
    sqlx::query(
        "INSERT INTO accounts (id, username, password_hash, is_admin) VALUES ($1, $2, $3, TRUE)",
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(&hash)
    .execute(pool)
    .await?;

    info!("Seeded admin account '{username}'");
    Ok(())
}
