//! Connection settings for the Zorya API.

use std::env;
use std::fmt;

pub const BASE_URL_VAR: &str = "ZORYA_BASE_URL";
pub const USERNAME_VAR: &str = "ZORYA_USERNAME";
pub const PASSWORD_VAR: &str = "ZORYA_PASSWORD";

/// Base URL and login credentials, fixed for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Read `ZORYA_BASE_URL`, `ZORYA_USERNAME` and `ZORYA_PASSWORD`.
    ///
    /// Unset variables become empty strings; the missing-credentials error is
    /// raised when logging in, not here.
    pub fn from_env() -> Self {
        let var = |name| env::var(name).unwrap_or_default();
        Self::new(&var(BASE_URL_VAR), &var(USERNAME_VAR), &var(PASSWORD_VAR))
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
