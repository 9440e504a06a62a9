use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::{credentials, OPERATOR_ID, SESSION_COOKIE};
use crate::error::AppError;
use crate::routes::{reject_body, Success};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
    pub expires: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    pub expires: DateTime<Utc>,
}

fn session_cookie(token: &str, ttl_hours: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(ttl_hours))
        .build()
}

fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

fn expiry(exp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(exp, 0).unwrap_or_else(Utc::now)
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let Json(req) = payload.map_err(reject_body)?;

    if state.login_limiter.check(&req.username).is_err() {
        tracing::warn!(username = %req.username, "Login rate limit hit");
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    if !credentials::verify(&state.config, &req.username, &req.password) {
        state.login_limiter.record_failure(&req.username);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }
    state.login_limiter.reset(&req.username);

    let ttl_hours = state.config.session_ttl_hours;
    let claims = Claims::new(OPERATOR_ID, &req.username, Duration::hours(ttl_hours));
    let token = encode_token(&claims, &state.config.session_secret).map_err(AppError::Internal)?;

    tracing::info!(username = %req.username, "Operator signed in");

    let jar = jar.add(session_cookie(&token, ttl_hours, state.config.secure_cookies));
    Ok((
        jar,
        Json(LoginResponse {
            token,
            user: SessionUser {
                id: claims.sub,
                name: claims.name,
            },
            expires: expiry(claims.exp),
        }),
    ))
}

/// Sessions are stateless tokens, so logging out only drops the cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Success>) {
    (jar.add(cleared_session_cookie()), Json(Success::OK))
}

pub async fn session(auth: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        expires: expiry(auth.expires_at),
        user: SessionUser {
            id: auth.user_id,
            name: auth.name,
        },
    })
}
