use std::net::IpAddr;

/// `DATABASE_URL` value that selects the in-process store.
pub const MEMORY_STORE: &str = "memory";

/// One year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub auth_username: String,
    pub auth_password: String,
    pub host: IpAddr,
    pub port: u16,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = env_required("DATABASE_URL")?;
        let session_secret = env_required("SESSION_SECRET")?;
        if session_secret.len() < 16 {
            return Err("SESSION_SECRET must be at least 16 characters".to_string());
        }

        let auth_username = env_or("AUTH_USERNAME", "admin");
        let auth_password = env_or("AUTH_PASSWORD", "admin");

        let host: IpAddr = env_or("SMART_MANAGER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SMART_MANAGER_HOST: {e}"))?;

        let port: u16 = env_or("SMART_MANAGER_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SMART_MANAGER_PORT: {e}"))?;

        let session_ttl_hours: i64 = env_or("SMART_MANAGER_SESSION_TTL_HOURS", "720")
            .parse()
            .map_err(|e| format!("Invalid SMART_MANAGER_SESSION_TTL_HOURS: {e}"))?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(format!(
                "SMART_MANAGER_SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}"
            ));
        }

        let secure_cookies = match env_or("SMART_MANAGER_SECURE_COOKIES", "true").as_str() {
            "false" | "0" => false,
            _ => true,
        };

        let max_body_size: usize = env_or("SMART_MANAGER_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid SMART_MANAGER_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("SMART_MANAGER_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            session_secret,
            auth_username,
            auth_password,
            host,
            port,
            session_ttl_hours,
            secure_cookies,
            max_body_size,
            log_level,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_STORE
    }
}
