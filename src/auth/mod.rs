pub mod credentials;
pub mod extractor;
pub mod jwt;

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "session_token";

/// Identity issued to the single operator account.
pub const OPERATOR_ID: &str = "user-1";
