//! Request construction
//!
//! Turns an endpoint description into a complete `HttpRequest`. Nothing here
//! performs I/O.

use bridge_traits::http::{HttpMethod, HttpRequest};
use bytes::Bytes;
use core_auth::AuthHeader;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::error::{FilesError, Result};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Resolve `path` against the API root and append `query`.
///
/// `path` is relative ("files/list"); a leading `/` is ignored so it can
/// never escape the versioned root.
pub fn endpoint_url(base_url: &Url, path: &str, query: &[(String, String)]) -> Result<Url> {
    if base_url.cannot_be_a_base() {
        return Err(FilesError::InvalidUrl(format!(
            "'{}' cannot be used as an API root",
            base_url
        )));
    }

    let mut url = base_url.join(path.trim_start_matches('/'))?;

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(name, value)| (name.as_str(), value.as_str())));
    }

    Ok(url)
}

/// Description of one API call, before authentication is attached
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
    content_type: &'static str,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            content_type: CONTENT_TYPE_JSON,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Encode `parameters` as the JSON body.
    ///
    /// # Errors
    ///
    /// `FilesError::InvalidParameters` if serialization fails.
    pub fn with_json_body<P: Serialize + ?Sized>(self, parameters: &P) -> Result<Self> {
        let body = encode_json_body(parameters)?;
        Ok(self.with_body(body))
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Produce the outgoing request.
    ///
    /// The content type is sent on every request, body or not.
    pub fn build(
        self,
        base_url: &Url,
        auth: AuthHeader,
        timeout: Option<Duration>,
    ) -> Result<HttpRequest> {
        let url = endpoint_url(base_url, &self.path, &self.query)?;
        let (auth_name, auth_value) = auth.into_pair();

        let mut request = HttpRequest::new(self.method, url.as_str())
            .header(auth_name, auth_value)
            .header("Content-Type", self.content_type)
            .header("Accept", CONTENT_TYPE_JSON);

        if let Some(body) = self.body {
            request = request.body(body);
        }

        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        Ok(request)
    }
}

pub fn encode_json_body<P: Serialize + ?Sized>(parameters: &P) -> Result<Bytes> {
    serde_json::to_vec(parameters)
        .map(Bytes::from)
        .map_err(|e| FilesError::InvalidParameters(e.to_string()))
}
