use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated: no access token available")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, AuthError>;
