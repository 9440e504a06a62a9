use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::{jwt, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::SharedState;

/// The authenticated operator behind a request.
///
/// Taking this as a handler argument is the authorization gate: extraction
/// fails with 401 before the handler body, and so before any store access.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub name: String,
    pub expires_at: i64,
}

impl From<jwt::Claims> for AuthUser {
    fn from(claims: jwt::Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            expires_at: claims.exp,
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let secret = &state.config.session_secret;

        // Try Bearer token from Authorization header first
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let claims = jwt::decode_token(token, secret)
                    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;
                return Ok(claims.into());
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            let claims = jwt::decode_token(cookie.value(), secret)
                .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))?;
            return Ok(claims.into());
        }

        Err(AppError::Unauthorized("Missing session".to_string()))
    }
}
