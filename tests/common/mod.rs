#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use smart_manager::config::Config;
use smart_manager::db::MemoryStore;

pub const USERNAME: &str = "operator";
pub const PASSWORD: &str = "correct-horse";
pub const SECRET: &str = "test-session-secret-long-enough";

/// A running test server backed by a fresh in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Login and return the response body + status.
    pub async fn login(&self, username: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Sign in with the configured credentials, return the session token.
    pub async fn token(&self) -> String {
        let (body, status) = self.login(USERNAME, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a project, return the project JSON.
    pub async fn create_project(&self, token: &str, name: &str) -> Value {
        let (body, status) = self.post_auth("/projects", token, &project_payload(name)).await;
        assert_eq!(status, StatusCode::OK, "create project failed: {body}");
        body
    }

    pub async fn list_projects(&self, token: &str) -> Vec<Value> {
        let (body, status) = self.get_auth("/projects", token).await;
        assert_eq!(status, StatusCode::OK, "list projects failed: {body}");
        body.as_array().expect("list is not an array").clone()
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PUT request with JSON body.
    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// A complete create payload with the given name.
pub fn project_payload(name: &str) -> Value {
    json!({
        "name": name,
        "renderWorkerUrl": "https://w.example.com",
        "renderBackendUrl": "https://b.example.com",
        "proxiedBackendUrl": "https://api.example.com",
        "proxiedWorkerUrl": "https://jobs.example.com",
        "dashboardUrl": "https://d.example.com",
        "proxiedDashboardUrl": "https://app.example.com",
        "websiteUrl": "https://example.com",
        "dashboardBranch": "main",
        "backendBranch": "main",
        "workerBranch": "main"
    })
}

pub fn test_config() -> Config {
    Config {
        database_url: "memory".to_string(),
        session_secret: SECRET.to_string(),
        auth_username: USERNAME.to_string(),
        auth_password: PASSWORD.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        session_ttl_hours: 1,
        secure_cookies: false,
        max_body_size: 65_536,
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app on a random port.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let app = smart_manager::build_app(store.clone(), test_config());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        store,
        client,
    }
}
