//! HTTP client for the project API and the local project list built on it.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::models::{NewProject, Project, ProjectPatch};
use crate::search;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("not signed in or session expired")]
    Unauthorized,
    #[error("project not found")]
    NotFound,
    #[error("request failed with status {status}: {message}")]
    Failed { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct LoginBody {
    token: String,
}

/// Thin wrapper over the HTTP surface. Holds the bearer token once signed in.
#[derive(Debug, Clone)]
pub struct ProjectClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ProjectClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let body: LoginBody = check(resp).await?.json().await?;
        self.token = Some(body.token);
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Project>, ClientError> {
        let resp = self.authed(self.http.get(self.url("/projects"))).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn create(&self, project: &NewProject) -> Result<Project, ClientError> {
        let resp = self
            .authed(self.http.post(self.url("/projects")))
            .json(project)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn update(&self, id: Uuid, patch: &ProjectPatch) -> Result<(), ClientError> {
        let resp = self
            .authed(self.http.put(self.url(&format!("/projects/{id}"))))
            .json(patch)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .authed(self.http.delete(self.url(&format!("/projects/{id}"))))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    match resp.status() {
        status if status.is_success() => Ok(resp),
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        status => {
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_default();
            Err(ClientError::Failed {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// A possibly-stale local copy of the project list.
///
/// Every successful mutation re-fetches the list, so after `create`, `update`
/// or `delete` returns `Ok` the copy reflects the store. Failed calls leave it
/// untouched and are not retried.
pub struct ProjectBook {
    client: ProjectClient,
    projects: Vec<Project>,
}

impl ProjectBook {
    pub fn new(client: ProjectClient) -> Self {
        Self {
            client,
            projects: Vec::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn search(&self, query: &str) -> Vec<&Project> {
        search::filter(&self.projects, query)
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.projects = self.client.list().await?;
        Ok(())
    }

    pub async fn create(&mut self, project: &NewProject) -> Result<Project, ClientError> {
        let created = self.client.create(project).await.inspect_err(log_failure)?;
        self.refresh().await?;
        Ok(created)
    }

    /// Save the edit form: every field is sent and overwritten.
    pub async fn save(&mut self, id: Uuid, project: NewProject) -> Result<(), ClientError> {
        self.update(id, &ProjectPatch::from(project)).await
    }

    pub async fn update(&mut self, id: Uuid, patch: &ProjectPatch) -> Result<(), ClientError> {
        self.client.update(id, patch).await.inspect_err(log_failure)?;
        self.refresh().await
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.client.delete(id).await.inspect_err(log_failure)?;
        self.refresh().await
    }
}

fn log_failure(err: &ClientError) {
    tracing::warn!("Project request failed: {err}");
}
