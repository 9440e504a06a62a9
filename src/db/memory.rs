use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{ProjectStore, StoreError};
use crate::models::{NewProject, Project, ProjectPatch};

/// In-process project store.
///
/// Counts every call it receives and can be switched offline, in which case
/// each call fails with [`StoreError::Unavailable`].
#[derive(Default)]
pub struct MemoryStore {
    projects: RwLock<Vec<Project>>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of store calls so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Project>, StoreError> {
        self.enter()?;
        let mut projects = self.projects.read().await.clone();
        // v7 ids grow with insertion time, so ties go to the newer record.
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(projects)
    }

    async fn insert(&self, project: &NewProject, now: DateTime<Utc>) -> Result<Uuid, StoreError> {
        self.enter()?;
        let id = Uuid::now_v7();
        self.projects
            .write()
            .await
            .push(project.clone().into_project(id, now));
        Ok(id)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        self.enter()?;
        let mut projects = self.projects.write().await;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(0);
        };
        patch.apply(project);
        project.updated_at = now.max(project.updated_at + Duration::microseconds(1));
        Ok(1)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        self.enter()?;
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok((before - projects.len()) as u64)
    }
}
