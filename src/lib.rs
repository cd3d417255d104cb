//! Workspace umbrella crate.
//!
//! Re-exports the put.io files service together with the configuration and
//! credential types a host needs to wire it up. The `desktop-shims` feature
//! (on by default) adds the reqwest-backed HTTP client and the environment
//! credential store, and lets `ClientConfig` fall back to them.

pub use bridge_traits::{BridgeError, CredentialsStore, HttpClient};
pub use core_auth::SharedCredentials;
pub use core_runtime::config::{ClientConfig, ClientConfigBuilder};
pub use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
pub use provider_putio::{
    Extraction, FetchedFilesPage, FileEntry, FileType, FilesError, FilesService,
    ListParameters, Listing, NextPageParameters, OperationHandle, SearchParameters, Searching,
    SortBy,
};

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop::{EnvCredentialsStore, ReqwestHttpClient};
