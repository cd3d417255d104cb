//! Credential Store Abstraction
//!
//! Read-only view of the access token the host keeps for the current account.
//! Token refresh and persistence live outside the core; the core only asks
//! for the current value right before it needs it.

/// Credential store trait
///
/// Implementations may be updated concurrently by a token-refresh process,
/// so callers must never cache the returned value across phases of a request.
///
/// # Security
///
/// Implementations must never log the token value.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::credentials::CredentialsStore;
///
/// fn is_signed_in(store: &dyn CredentialsStore) -> bool {
///     store.access_token().is_some()
/// }
/// ```
pub trait CredentialsStore: Send + Sync {
    /// Current access token, or `None` when unauthenticated
    fn access_token(&self) -> Option<String>;

    /// Whether a token is currently available
    fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }
}
