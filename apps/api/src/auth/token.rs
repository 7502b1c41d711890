use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Sessions stay valid this long; expiry is the only invalidation, there is
/// no revocation list.
const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    fn new(account_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        }
    }
}

/// Signs a session token carrying the account id.
pub fn issue_token(secret: &str, account_id: Uuid) -> Result<String, AppError> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &Claims::new(account_id), &key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token signing failed: {e}")))
}

/// Resolves a bearer token back to its account id. Malformed, expired, and
/// tampered tokens all collapse into the same Unauthorized.
pub fn verify_token(secret: &str, token: &str) -> Result<Uuid, AppError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims.sub)
        .map_err(|_| AppError::Unauthorized("Authentication required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_then_verify_roundtrips_account_id() {
        let account_id = Uuid::new_v4();
        let token = issue_token(SECRET, account_id).unwrap();
        assert_eq!(verify_token(SECRET, &token).unwrap(), account_id);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_token(SECRET, Uuid::new_v4()).unwrap();
        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_token(SECRET, "not-a-token").is_err());
        assert!(verify_token(SECRET, "").is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let token = issue_token(SECRET, Uuid::new_v4()).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = "eyJzdWIiOiIwMDAwMDAwMC0wMDAwLTAwMDAtMDAwMC0wMDAwMDAwMDAwMDAifQ";
        parts[1] = forged;
        assert!(verify_token(SECRET, &parts.join(".")).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();
        assert!(verify_token(SECRET, &token).is_err());
    }
}
