//! Authorization header construction

use crate::error::{AuthError, Result};
use bridge_traits::credentials::CredentialsStore;
use std::fmt;
use tracing::debug;

pub const AUTHORIZATION: &str = "Authorization";

/// A ready-to-send `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader {
    value: String,
}

impl AuthHeader {
    fn bearer(token: &str) -> Self {
        Self {
            value: format!("Bearer {}", token),
        }
    }

    pub fn name(&self) -> &'static str {
        AUTHORIZATION
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_pair(self) -> (String, String) {
        (AUTHORIZATION.to_string(), self.value)
    }
}

// Keeps the token out of `{:?}` output.
impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeader")
            .field("name", &AUTHORIZATION)
            .field("value", &"Bearer [REDACTED]")
            .finish()
    }
}

/// The store's token with surrounding whitespace removed; `None` if blank
pub fn current_access_token(store: &dyn CredentialsStore) -> Option<String> {
    store
        .access_token()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Build the bearer header from the store's current token.
///
/// Returns `None` when there is no token, or it is blank. The caller must
/// treat that as a terminal failure for the request.
pub fn authentication_header(store: &dyn CredentialsStore) -> Option<AuthHeader> {
    match current_access_token(store) {
        Some(token) => Some(AuthHeader::bearer(&token)),
        None => {
            debug!("No access token available for authorization header");
            None
        }
    }
}

/// Same as [`authentication_header`], as a `Result`.
pub fn require_authentication_header(store: &dyn CredentialsStore) -> Result<AuthHeader> {
    authentication_header(store).ok_or(AuthError::NotAuthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SharedCredentials;

    #[test]
    fn test_bearer_header_from_token() {
        let store = SharedCredentials::with_token("abc");
        let header = authentication_header(&store).unwrap();

        assert_eq!(header.name(), "Authorization");
        assert_eq!(header.value(), "Bearer abc");
        assert_eq!(
            header.into_pair(),
            ("Authorization".to_string(), "Bearer abc".to_string())
        );
    }

    #[test]
    fn test_missing_token_yields_none() {
        let store = SharedCredentials::new();
        assert!(authentication_header(&store).is_none());
        assert_eq!(
            require_authentication_header(&store),
            Err(AuthError::NotAuthenticated)
        );
    }

    #[test]
    fn test_blank_token_is_treated_as_missing() {
        let store = SharedCredentials::with_token("   ");
        assert!(authentication_header(&store).is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let store = SharedCredentials::with_token("super-secret");
        let header = authentication_header(&store).unwrap();

        assert!(!format!("{:?}", header).contains("super-secret"));
    }

    #[test]
    fn test_header_reflects_latest_token() {
        let store = SharedCredentials::with_token("old");
        assert_eq!(authentication_header(&store).unwrap().value(), "Bearer old");

        store.set_access_token("new");
        assert_eq!(authentication_header(&store).unwrap().value(), "Bearer new");
    }

    #[test]
    fn test_token_read_is_trimmed() {
        let store = SharedCredentials::with_token("abc\n");
        assert_eq!(current_access_token(&store), Some("abc".to_string()));
        assert_eq!(authentication_header(&store).unwrap().value(), "Bearer abc");

        store.set_access_token(" \t");
        assert_eq!(current_access_token(&store), None);
    }
}
