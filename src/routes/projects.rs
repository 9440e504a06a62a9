use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectPatch};
use crate::routes::{reject_body, Success};
use crate::state::SharedState;

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = state.store.find_all().await?;
    Ok(Json(projects))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Result<Json<Project>, AppError> {
    let Json(req) = payload.map_err(reject_body)?;
    validate_name(&req.name)?;

    let now = timestamp();
    let id = state.store.insert(&req, now).await?;

    tracing::info!(project_id = %id, operator = %auth.name, "Project created");

    Ok(Json(req.into_project(id, now)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectPatch>, JsonRejection>,
) -> Result<Json<Success>, AppError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload.map_err(reject_body)?;
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }

    let matched = state.store.update_by_id(id, &patch, timestamp()).await?;
    if matched == 0 {
        return Err(not_found());
    }

    tracing::info!(project_id = %id, operator = %auth.name, "Project updated");

    Ok(Json(Success::OK))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Success>, AppError> {
    let id = parse_id(&id)?;

    let deleted = state.store.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found());
    }

    tracing::info!(project_id = %id, operator = %auth.name, "Project deleted");

    Ok(Json(Success::OK))
}

/// Current time at the store's microsecond resolution, so the record echoed
/// back from create matches what a later list returns.
fn timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}

/// An id that is not a UUID cannot name a stored project.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Project name is required".to_string()));
    }
    Ok(())
}
