use std::sync::Arc;

use crate::config::Config;
use crate::db::ProjectStore;
use crate::rate_limit::LoginRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub config: Config,
    pub login_limiter: LoginRateLimiter,
}
