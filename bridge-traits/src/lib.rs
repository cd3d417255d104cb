//! # Host Bridge Traits
//!
//! Seams between the put.io files core and the platform it runs on.
//!
//! The core decides *what* to send and how to read the answer. Moving bytes,
//! storing the access token and shipping logs are host concerns, reached
//! only through the traits below:
//!
//! - [`HttpClient`] sends one request and returns the raw response
//! - [`CredentialsStore`] yields the current access token, if any
//! - [`LoggerSink`] receives structured log events
//!
//! Desktop defaults for the first two live in `bridge-desktop`.
//!
//! All traits are `Send + Sync`; the core shares them across Tokio tasks
//! behind `Arc<dyn Trait>`. Implementations report failures as
//! [`BridgeError`].

pub mod credentials;
pub mod error;
pub mod http;
pub mod logging;

pub use credentials::CredentialsStore;
pub use error::BridgeError;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
