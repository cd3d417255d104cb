use core_runtime::config::ClientConfig;
use tracing::info;

use crate::listing::Listing;
use crate::pipeline::ServiceContext;
use crate::searching::Searching;

/// Entry point to the files API
///
/// Cheap to clone; clones share the HTTP client and credential store.
///
/// # Example
///
/// ```ignore
/// use core_runtime::config::ClientConfig;
/// use provider_putio::{FilesService, ListParameters};
///
/// let service = FilesService::new(&config);
/// service.listing().fetch_files(&ListParameters::folder(0), |result| {
///     if let Ok(page) = result {
///         println!("{} files", page.files.len());
///     }
/// });
/// ```
#[derive(Clone)]
pub struct FilesService {
    listing: Listing,
    searching: Searching,
}

impl FilesService {
    /// Create the service from a validated configuration
    pub fn new(config: &ClientConfig) -> Self {
        info!(base_url = %config.base_url, "Creating put.io files service");

        let context = ServiceContext::from_config(config);
        Self {
            listing: Listing::new(context.clone()),
            searching: Searching::new(context),
        }
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn searching(&self) -> &Searching {
        &self.searching
    }
}
