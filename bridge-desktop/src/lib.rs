//! # Desktop Bridge
//!
//! Ready-made host capabilities for desktop and server processes:
//!
//! - [`ReqwestHttpClient`]: `HttpClient` over reqwest with rustls
//! - [`EnvCredentialsStore`]: access token from `PUTIO_ACCESS_TOKEN`
//!
//! `core-runtime` wires both in automatically when built with its
//! `desktop-shims` feature.
//!
//! ```ignore
//! use bridge_desktop::{EnvCredentialsStore, ReqwestHttpClient};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let http_client = Arc::new(ReqwestHttpClient::with_options(
//!     Duration::from_secs(15),
//!     "my-player/2.1",
//! ));
//! let credentials = Arc::new(EnvCredentialsStore::new());
//! ```

mod credentials;
mod http;

pub use credentials::{EnvCredentialsStore, ACCESS_TOKEN_ENV};
pub use http::ReqwestHttpClient;
