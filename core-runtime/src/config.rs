//! # Client Configuration Module
//!
//! Provides configuration management for the put.io files core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `ClientConfig` holding the API location, request settings and the host
//! bridges the files service dispatches through. Validation is fail-fast:
//! `build()` refuses to produce a config the service could not use.
//!
//! ## Required Dependencies
//!
//! - `CredentialsStore` - Source of the access token
//! - `HttpClient` - HTTP exchange
//!
//! When the `desktop-shims` feature is enabled, `ReqwestHttpClient` and
//! `EnvCredentialsStore` from `bridge-desktop` are injected automatically if
//! not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ClientConfig;
//! use std::sync::Arc;
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://api.put.io/v2/")
//!     .http_client(Arc::new(MyHttpClient))
//!     .credentials(Arc::new(MyCredentials))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{CredentialsStore, HttpClient};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default put.io API root
pub const DEFAULT_BASE_URL: &str = "https://api.put.io/v2/";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);
const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Default user agent sent by the desktop HTTP client
pub const DEFAULT_USER_AGENT: &str = concat!("putio-files-core/", env!("CARGO_PKG_VERSION"));

/// Configuration for the put.io files client.
///
/// Use [`ClientConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root every endpoint path is joined onto; always ends with `/`
    pub base_url: Url,

    /// Timeout attached to every outgoing request
    pub request_timeout: Duration,

    /// User agent for the default HTTP client
    pub user_agent: String,

    /// HTTP client for API requests
    pub http_client: Arc<dyn HttpClient>,

    /// Access token source
    pub credentials: Arc<dyn CredentialsStore>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("http_client", &"HttpClient { ... }")
            .field("credentials", &"CredentialsStore { ... }")
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Base URL uses http(s), can be a base and ends with `/`
    /// - Request timeout is between 1 second and 5 minutes
    /// - User agent is not empty
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.base_url)?;

        if self.request_timeout < MIN_REQUEST_TIMEOUT {
            return Err(Error::Config(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }

        if self.request_timeout > MAX_REQUEST_TIMEOUT {
            return Err(Error::Config(
                "Request timeout exceeds maximum of 300 seconds".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }

        Ok(())
    }
}

fn validate_base_url(url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "Base URL '{}' cannot be used as a base",
            url
        )));
    }

    if !url.path().ends_with('/') {
        return Err(Error::Config(format!(
            "Base URL '{}' must end with '/'",
            url
        )));
    }

    Ok(())
}

/// Parses a base URL and appends the trailing `/` relative joins rely on.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Config("Base URL cannot be empty".to_string()));
    }

    let mut url = Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", trimmed, e)))?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    validate_base_url(&url)?;
    Ok(url)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(
    _timeout: Duration,
    _user_agent: &str,
) -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required to reach the put.io API. \
                 Desktop: enable the 'desktop-shims' feature to use ReqwestHttpClient. \
                 Mobile: inject the platform networking adapter."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(
    timeout: Duration,
    user_agent: &str,
) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_options(timeout, user_agent));
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_credentials() -> Result<Arc<dyn CredentialsStore>> {
    Err(Error::CapabilityMissing {
        capability: "CredentialsStore".to_string(),
        message: "CredentialsStore implementation is required to authenticate requests. \
                 Desktop: enable the 'desktop-shims' feature to read PUTIO_ACCESS_TOKEN. \
                 Mobile: inject the Keychain/Keystore backed store."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_credentials() -> Result<Arc<dyn CredentialsStore>> {
    use bridge_desktop::EnvCredentialsStore;

    let store: Arc<dyn CredentialsStore> = Arc::new(EnvCredentialsStore::new());
    Ok(store)
}

/// Builder for constructing [`ClientConfig`] instances.
///
/// Call [`build()`](ClientConfigBuilder::build) to validate and create the
/// final config.
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    credentials: Option<Arc<dyn CredentialsStore>>,
}

impl ClientConfigBuilder {
    /// Sets the API root. A missing trailing `/` is added.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout (default: 30 seconds).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the user agent used by the default HTTP client.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the credential store.
    pub fn credentials(mut self, store: Arc<dyn CredentialsStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Builds the final `ClientConfig` instance.
    ///
    /// # Errors
    ///
    /// - `Error::Config` for an unparsable base URL or out-of-range values
    /// - `Error::CapabilityMissing` when a bridge is missing and no desktop
    ///   default is available
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout, &user_agent)?,
        };

        let credentials = match self.credentials {
            Some(store) => store,
            None => provide_default_credentials()?,
        };

        let config = ClientConfig {
            base_url,
            request_timeout,
            user_agent,
            http_client,
            credentials,
        };

        config.validate()?;

        Ok(config)
    }
}
