use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewProject, Project, ProjectPatch};

pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY updated_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

/// Ids are UUIDv7, so `id DESC` breaks `updated_at` ties newest first.
pub async fn create(
    pool: &PgPool,
    project: &NewProject,
    now: DateTime<Utc>,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO projects (
             id, name, render_worker_url, render_backend_url, proxied_backend_url,
             proxied_worker_url, dashboard_url, proxied_dashboard_url, website_url,
             dashboard_branch, backend_branch, worker_branch, created_at, updated_at
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
         RETURNING id",
    )
    .bind(Uuid::now_v7())
    .bind(&project.name)
    .bind(&project.render_worker_url)
    .bind(&project.render_backend_url)
    .bind(&project.proxied_backend_url)
    .bind(&project.proxied_worker_url)
    .bind(&project.dashboard_url)
    .bind(&project.proxied_dashboard_url)
    .bind(&project.website_url)
    .bind(&project.dashboard_branch)
    .bind(&project.backend_branch)
    .bind(&project.worker_branch)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Returns the number of matched rows.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: &ProjectPatch,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE projects SET
             name = COALESCE($2, name),
             render_worker_url = COALESCE($3, render_worker_url),
             render_backend_url = COALESCE($4, render_backend_url),
             proxied_backend_url = COALESCE($5, proxied_backend_url),
             proxied_worker_url = COALESCE($6, proxied_worker_url),
             dashboard_url = COALESCE($7, dashboard_url),
             proxied_dashboard_url = COALESCE($8, proxied_dashboard_url),
             website_url = COALESCE($9, website_url),
             dashboard_branch = COALESCE($10, dashboard_branch),
             backend_branch = COALESCE($11, backend_branch),
             worker_branch = COALESCE($12, worker_branch),
             updated_at = GREATEST($13, updated_at + INTERVAL '1 microsecond')
         WHERE id = $1",
    )
    .bind(id)
    .bind(&patch.name)
    .bind(&patch.render_worker_url)
    .bind(&patch.render_backend_url)
    .bind(&patch.proxied_backend_url)
    .bind(&patch.proxied_worker_url)
    .bind(&patch.dashboard_url)
    .bind(&patch.proxied_dashboard_url)
    .bind(&patch.website_url)
    .bind(&patch.dashboard_branch)
    .bind(&patch.backend_branch)
    .bind(&patch.worker_branch)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Returns the number of deleted rows.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
