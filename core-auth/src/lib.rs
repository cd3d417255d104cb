//! # Authentication Module
//!
//! Credential handling for the put.io files core.
//!
//! ## Overview
//!
//! - [`SharedCredentials`]: an in-memory `CredentialsStore` that a host-side
//!   token refresher can update while requests are in flight.
//! - [`authentication_header`]: builds the `Authorization` header from the
//!   current token, or reports that the caller is not signed in.
//!
//! Obtaining and refreshing tokens is the host's job; this crate only reads.

pub mod error;
pub mod header;
pub mod shared;

pub use error::{AuthError, Result};
pub use header::{
    authentication_header, current_access_token, require_authentication_header, AuthHeader,
};
pub use shared::SharedCredentials;
