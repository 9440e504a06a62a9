use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked deployment target.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub render_worker_url: String,
    pub render_backend_url: String,
    pub proxied_backend_url: String,
    pub proxied_worker_url: String,
    pub dashboard_url: String,
    pub proxied_dashboard_url: String,
    pub website_url: String,
    pub dashboard_branch: String,
    pub backend_branch: String,
    pub worker_branch: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload: every field of [`Project`] except the server-managed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub render_worker_url: String,
    pub render_backend_url: String,
    pub proxied_backend_url: String,
    pub proxied_worker_url: String,
    pub dashboard_url: String,
    pub proxied_dashboard_url: String,
    pub website_url: String,
    pub dashboard_branch: String,
    pub backend_branch: String,
    pub worker_branch: String,
}

impl NewProject {
    /// The stored record for this payload, stamped with `now` on both timestamps.
    pub fn into_project(self, id: Uuid, now: DateTime<Utc>) -> Project {
        Project {
            id,
            name: self.name,
            render_worker_url: self.render_worker_url,
            render_backend_url: self.render_backend_url,
            proxied_backend_url: self.proxied_backend_url,
            proxied_worker_url: self.proxied_worker_url,
            dashboard_url: self.dashboard_url,
            proxied_dashboard_url: self.proxied_dashboard_url,
            website_url: self.website_url,
            dashboard_branch: self.dashboard_branch,
            backend_branch: self.backend_branch,
            worker_branch: self.worker_branch,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` (absent or `null`) leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_worker_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_backend_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied_backend_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied_worker_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied_dashboard_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_branch: Option<String>,
}

impl ProjectPatch {
    /// Overwrite the fields present in the patch. Timestamps are not touched.
    pub fn apply(&self, project: &mut Project) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        set(&mut project.name, &self.name);
        set(&mut project.render_worker_url, &self.render_worker_url);
        set(&mut project.render_backend_url, &self.render_backend_url);
        set(&mut project.proxied_backend_url, &self.proxied_backend_url);
        set(&mut project.proxied_worker_url, &self.proxied_worker_url);
        set(&mut project.dashboard_url, &self.dashboard_url);
        set(&mut project.proxied_dashboard_url, &self.proxied_dashboard_url);
        set(&mut project.website_url, &self.website_url);
        set(&mut project.dashboard_branch, &self.dashboard_branch);
        set(&mut project.backend_branch, &self.backend_branch);
        set(&mut project.worker_branch, &self.worker_branch);
    }
}

impl From<NewProject> for ProjectPatch {
    fn from(p: NewProject) -> Self {
        Self {
            name: Some(p.name),
            render_worker_url: Some(p.render_worker_url),
            render_backend_url: Some(p.render_backend_url),
            proxied_backend_url: Some(p.proxied_backend_url),
            proxied_worker_url: Some(p.proxied_worker_url),
            dashboard_url: Some(p.dashboard_url),
            proxied_dashboard_url: Some(p.proxied_dashboard_url),
            website_url: Some(p.website_url),
            dashboard_branch: Some(p.dashboard_branch),
            backend_branch: Some(p.backend_branch),
            worker_branch: Some(p.worker_branch),
        }
    }
}
