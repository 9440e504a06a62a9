pub mod auth;
pub mod projects;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post, put};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::SharedState;

/// `{ "success": true }` acknowledgement body.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub const OK: Success = Success { success: true };
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        // Projects
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            put(projects::update).delete(projects::delete),
        )
}

/// Malformed or incomplete JSON bodies become a 400 with the usual error shape.
pub(crate) fn reject_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
