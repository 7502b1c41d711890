use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::token::verify_token;
use crate::errors::AppError;
use crate::models::account::Account;
use crate::state::AppState;

/// Validates the bearer token and loads the account it names, inserting it
/// as a request extension for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let account = authenticate(&state, request.headers()).await?;
    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

/// `require_auth` plus the admin flag. A valid token for a non-admin
/// account still gets a 401 here.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let account = authenticate(&state, request.headers()).await?;
    if !account.is_admin {
        return Err(AppError::Unauthorized("Administrator access required"));
    }
    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

/// Never rejects: a valid token attaches the account, anything else leaves
/// the request anonymous. Used where authentication only enriches.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(account) = authenticate(&state, request.headers()).await {
        request.extensions_mut().insert(account);
    }
    next.run(request).await
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Account, AppError> {
    let token = bearer_token(headers)?;
    let account_id = verify_token(&state.config.jwt_secret, token)?;

    // The account is re-read on every request, so a token naming a since-
    // deleted account stops working immediately.
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized("Authentication required"))
}

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized("Authentication required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracts_value() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_rejects_missing_header() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_bearer_token_rejects_empty_token() {
        let headers = headers_with_auth("Bearer   ");
        assert!(bearer_token(&headers).is_err());
    }
}
