//! `HttpClient` backed by reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse},
};
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_USER_AGENT: &str = concat!("putio-files-core/", env!("CARGO_PKG_VERSION"));

/// Desktop HTTP client
///
/// One pooled reqwest `Client` with rustls. Each call sends exactly once;
/// per-request timeouts override the client-wide one.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Could not configure HTTP client, using defaults");
                Client::new()
            });

        Self { client }
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    fn prepare(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let builder = request.headers.into_iter().fold(
            self.client.request(Self::method(request.method), &request.url),
            |builder, (name, value)| builder.header(name, value),
        );

        let builder = match request.body {
            Some(body) => builder.body(body),
            None => builder,
        };

        match request.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    fn send_error(error: reqwest::Error) -> BridgeError {
        if error.is_timeout() {
            BridgeError::Timeout(error.to_string())
        } else if error.is_connect() {
            BridgeError::OperationFailed(format!("Connection failed: {}", error))
        } else {
            BridgeError::OperationFailed(error.to_string())
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let started = Instant::now();

        let response = self
            .prepare(request)
            .send()
            .await
            .map_err(Self::send_error)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response.bytes().await.map_err(Self::send_error)?;

        debug!(
            %method,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "HTTP exchange finished"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
