//! In-memory credential store shared between the client and a refresher

use bridge_traits::credentials::CredentialsStore;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Cloneable handle to a single access token slot.
///
/// Every clone observes the same slot, so a refresh task holding one clone
/// can swap the token while the files service, holding another, reads it.
#[derive(Clone, Default)]
pub struct SharedCredentials {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedCredentials {
    /// Empty (signed-out) store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// Replace the current token
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(token.into());
        info!("Access token updated");
    }

    /// Forget the current token (sign out)
    pub fn clear(&self) {
        let mut slot = self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.take().is_some() {
            info!("Access token cleared");
        } else {
            debug!("Clear requested on empty credential store");
        }
    }
}

impl CredentialsStore for SharedCredentials {
    fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl fmt::Debug for SharedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCredentials")
            .field("has_token", &self.has_access_token())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slot() {
        let store = SharedCredentials::new();
        let refresher = store.clone();

        assert_eq!(store.access_token(), None);

        refresher.set_access_token("abc");
        assert_eq!(store.access_token(), Some("abc".to_string()));

        refresher.clear();
        assert!(!store.has_access_token());
    }

    #[test]
    fn test_debug_hides_token() {
        let store = SharedCredentials::with_token("secret");
        let debug = format!("{:?}", store);

        assert!(debug.contains("has_token: true"));
        assert!(!debug.contains("secret"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_refresh_and_read() {
        let store = SharedCredentials::with_token("t0");
        let writer = store.clone();

        let refresh = tokio::spawn(async move {
            for i in 1..=50 {
                writer.set_access_token(format!("t{}", i));
                tokio::task::yield_now().await;
            }
        });

        for _ in 0..50 {
            let token = store.access_token().unwrap();
            assert!(token.starts_with('t'));
            tokio::task::yield_now().await;
        }

        refresh.await.unwrap();
        assert_eq!(store.access_token(), Some("t50".to_string()));
    }
}
