//! HTTP exchange seam
//!
//! The files core describes each call as an [`HttpRequest`] and hands it to
//! the host's [`HttpClient`]. The host owns sockets, TLS and proxies.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::{BridgeError, Result};

/// Methods used by the files API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully built request, ready to send
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL including the encoded query string
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Header value, matching the name case-insensitively
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Raw response as received; any status is a valid response here
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| BridgeError::Decode(e.to_string()))
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Async HTTP client provided by the host
///
/// Implementations send the request exactly once. The core never retries
/// and expects the same from the client; a host that wants retries wraps its
/// own client.
///
/// The future returned by `execute` may be dropped before it resolves when
/// the caller cancels the operation, so implementations must not rely on
/// running to completion.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
///
/// async fn account_info(client: &dyn HttpClient, token: &str) -> Result<String> {
///     let request = HttpRequest::new(HttpMethod::Get, "https://api.put.io/v2/account/info")
///         .header("Authorization", format!("Bearer {}", token));
///
///     Ok(client.execute(request).await?.text_lossy())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send `request` and return whatever the server answered.
    ///
    /// A non-2xx status is still `Ok`.
    ///
    /// # Errors
    ///
    /// Connection, TLS and timeout failures.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let request = HttpRequest::new(HttpMethod::Post, "https://api.put.io/v2/files/list/continue")
            .header("Content-Type", "application/json")
            .body(Bytes::from_static(br#"{"cursor":"c1"}"#))
            .timeout(Duration::from_secs(30));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.header_value("content-type"), Some("application/json"));
        assert_eq!(request.body, Some(Bytes::from_static(br#"{"cursor":"c1"}"#)));
        assert_eq!(request.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_http_response_helpers() {
        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_string(), "r-1".to_string());
        let response = HttpResponse {
            status: 204,
            headers,
            body: Bytes::from_static(b"caf\xe9"),
        };

        assert!(response.is_success());
        assert_eq!(response.header("x-request-id"), Some("r-1"));
        assert_eq!(response.text_lossy(), "caf\u{FFFD}");

        let response = HttpResponse {
            status: 404,
            headers: HashMap::new(),
            body: Bytes::new(),
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_http_response_json_decode_error() {
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from("not json"),
        };

        let result: Result<serde_json::Value> = response.json();
        assert!(matches!(result, Err(BridgeError::Decode(_))));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Get.as_str(), "GET");
    }
}
