pub mod memory;
pub mod projects;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewProject, Project, ProjectPatch};

pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence contract for project records.
///
/// Update and delete report how many records matched; zero means the id is
/// unknown. Each call touches at most one record and is atomic at that
/// granularity. Concurrent updates to the same id are last-writer-wins.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Every project, most recently updated first.
    async fn find_all(&self) -> Result<Vec<Project>, StoreError>;

    /// Persist a new record with both timestamps set to `now`. The store picks the id.
    async fn insert(&self, project: &NewProject, now: DateTime<Utc>) -> Result<Uuid, StoreError>;

    /// Merge `patch` into the record and bump `updated_at` to `now`, or just
    /// past the previous value if the clock has not moved forward.
    async fn update_by_id(
        &self,
        id: Uuid,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn find_all(&self) -> Result<Vec<Project>, StoreError> {
        Ok(projects::list(&self.pool).await?)
    }

    async fn insert(&self, project: &NewProject, now: DateTime<Utc>) -> Result<Uuid, StoreError> {
        Ok(projects::create(&self.pool, project, now).await?)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Ok(projects::update(&self.pool, id, patch, now).await?)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        Ok(projects::delete(&self.pool, id).await?)
    }
}
