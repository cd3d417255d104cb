//! Unified fetch pipeline
//!
//! Listing and searching differ only in the collection they address, so both
//! run through one [`FilesPipeline`]: authenticate, build, dispatch, decode,
//! rewrite. Failures before dispatch are reported synchronously through the
//! completion and no transport operation is started.

use bridge_traits::credentials::CredentialsStore;
use bridge_traits::http::HttpResponse;
use core_auth::{current_access_token, require_authentication_header};
use core_runtime::config::ClientConfig;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::Result;
use crate::request::ApiRequest;
use crate::rewrite::rewrite_page;
use crate::transport::{decode_json, OperationHandle, Transport};
use crate::types::{FetchedFilesPage, QueryParameters};

pub const LIST_PATH: &str = "files/list";
pub const SEARCH_PATH: &str = "files/search";
const CONTINUE_SUFFIX: &str = "/continue";

/// Everything needed to turn an [`ApiRequest`] into a running operation
#[derive(Clone)]
pub(crate) struct ServiceContext {
    base_url: Url,
    request_timeout: Duration,
    credentials: Arc<dyn CredentialsStore>,
    transport: Transport,
}

impl ServiceContext {
    pub(crate) fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            request_timeout: config.request_timeout,
            credentials: Arc::clone(&config.credentials),
            transport: Transport::new(Arc::clone(&config.http_client)),
        }
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn credentials(&self) -> Arc<dyn CredentialsStore> {
        Arc::clone(&self.credentials)
    }

    /// Authenticate, build and start one request.
    ///
    /// The credential check runs before `build` is called, so URL and header
    /// assembly only happen for a signed-in caller. Any failure up to dispatch
    /// invokes `completion` on the calling thread and returns `None`.
    pub(crate) fn dispatch<T, B, D, F>(
        &self,
        build: B,
        decode: D,
        completion: F,
    ) -> Option<OperationHandle>
    where
        T: Send + 'static,
        B: FnOnce() -> Result<ApiRequest>,
        D: FnOnce(HttpResponse) -> Result<T> + Send + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let auth = match require_authentication_header(self.credentials.as_ref()) {
            Ok(auth) => auth,
            Err(e) => {
                warn!("Request rejected: no access token");
                completion(Err(e.into()));
                return None;
            }
        };

        let request = match build()
            .and_then(|request| request.build(&self.base_url, auth, Some(self.request_timeout)))
        {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Request could not be built");
                completion(Err(e));
                return None;
            }
        };

        self.transport.start(request, decode, completion)
    }
}

/// Fetch pipeline for one file collection (`files/list` or `files/search`)
#[derive(Clone)]
pub struct FilesPipeline {
    context: ServiceContext,
    collection: &'static str,
}

impl FilesPipeline {
    pub(crate) fn new(context: ServiceContext, collection: &'static str) -> Self {
        Self {
            context,
            collection,
        }
    }

    pub(crate) fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// Collection path this pipeline addresses
    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// GET the collection with `parameters` as the query string
    pub fn first_page<Q, F>(&self, parameters: &Q, completion: F) -> Option<OperationHandle>
    where
        Q: QueryParameters + ?Sized,
        F: FnOnce(Result<FetchedFilesPage>) + Send + 'static,
    {
        let collection = self.collection;
        self.fetch(
            || Ok(ApiRequest::get(collection).with_query(parameters.query_items())),
            completion,
        )
    }

    /// POST `parameters` as JSON to the collection's `/continue` endpoint.
    ///
    /// The body is encoded before credentials are consulted: parameters that
    /// cannot be serialized fail with `InvalidParameters` even when signed out.
    pub fn next_page<P, F>(&self, parameters: &P, completion: F) -> Option<OperationHandle>
    where
        P: Serialize + ?Sized,
        F: FnOnce(Result<FetchedFilesPage>) + Send + 'static,
    {
        let path = format!("{}{}", self.collection, CONTINUE_SUFFIX);
        let request = match ApiRequest::post(path).with_json_body(parameters) {
            Ok(request) => request,
            Err(e) => {
                warn!(collection = self.collection, error = %e, "Continuation parameters rejected");
                completion(Err(e));
                return None;
            }
        };

        self.fetch(move || Ok(request), completion)
    }

    fn fetch<B, F>(&self, build: B, completion: F) -> Option<OperationHandle>
    where
        B: FnOnce() -> Result<ApiRequest>,
        F: FnOnce(Result<FetchedFilesPage>) + Send + 'static,
    {
        let base_url = self.context.base_url().clone();
        let credentials = self.context.credentials();
        let collection = self.collection;

        self.context.dispatch(build, decode_json::<FetchedFilesPage>, move |result| {
            let result = result.map(|page| {
                // Read the token now: it may have been refreshed since dispatch.
                let token = current_access_token(credentials.as_ref());
                debug!(collection, files = page.files.len(), "Fetched page");
                rewrite_page(page, &base_url, token.as_deref())
            });
            completion(result);
        })
    }
}
