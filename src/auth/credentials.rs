use subtle::ConstantTimeEq;

use crate::config::Config;

/// Check a username/password pair against the configured operator credentials.
///
/// Both comparisons always run so timing does not reveal which one failed.
pub fn verify(config: &Config, username: &str, password: &str) -> bool {
    let user_ok = username
        .as_bytes()
        .ct_eq(config.auth_username.as_bytes());
    let pass_ok = password
        .as_bytes()
        .ct_eq(config.auth_password.as_bytes());
    (user_ok & pass_ok).into()
}
