//! Driving port for the credential check.
//!
//! The baseline deployment compares against two configured constants; the
//! port exists so real credential storage can be swapped in later without
//! touching the HTTP adapter.

/// Capability for verifying a username/password pair.
pub trait Authenticator: Send + Sync {
    /// Exact, case-sensitive comparison. No trimming or normalisation.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Authenticator backed by two configured constants.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::new("admin", "password")
    }
}

impl Authenticator for StaticAuthenticator {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
