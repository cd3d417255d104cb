//! Environment-backed credential store

use bridge_traits::credentials::CredentialsStore;
use tracing::debug;

/// Default environment variable holding the put.io access token
pub const ACCESS_TOKEN_ENV: &str = "PUTIO_ACCESS_TOKEN";

/// Reads the access token from an environment variable on every access.
///
/// Nothing is cached, so a launcher or refresh script that rewrites the
/// variable is picked up on the next read. Empty values count as absent.
#[derive(Debug, Clone)]
pub struct EnvCredentialsStore {
    variable: String,
}

impl EnvCredentialsStore {
    pub fn new() -> Self {
        Self::with_variable(ACCESS_TOKEN_ENV)
    }

    pub fn with_variable(variable: impl Into<String>) -> Self {
        let variable = variable.into();
        debug!(variable = %variable, "Using environment credentials store");
        Self { variable }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl Default for EnvCredentialsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsStore for EnvCredentialsStore {
    fn access_token(&self) -> Option<String> {
        std::env::var(&self.variable)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_variable_on_each_access() {
        let store = EnvCredentialsStore::with_variable("PUTIO_TEST_TOKEN_READS");
        assert_eq!(store.access_token(), None);

        std::env::set_var("PUTIO_TEST_TOKEN_READS", "abc");
        assert_eq!(store.access_token(), Some("abc".to_string()));

        std::env::set_var("PUTIO_TEST_TOKEN_READS", "def");
        assert_eq!(store.access_token(), Some("def".to_string()));

        std::env::remove_var("PUTIO_TEST_TOKEN_READS");
        assert!(!store.has_access_token());
    }

    #[test]
    fn test_empty_value_is_absent() {
        std::env::set_var("PUTIO_TEST_TOKEN_EMPTY", "  ");
        let store = EnvCredentialsStore::with_variable("PUTIO_TEST_TOKEN_EMPTY");
        assert_eq!(store.access_token(), None);
        std::env::remove_var("PUTIO_TEST_TOKEN_EMPTY");
    }

    #[test]
    fn test_default_variable() {
        assert_eq!(EnvCredentialsStore::default().variable(), ACCESS_TOKEN_ENV);
    }
}
