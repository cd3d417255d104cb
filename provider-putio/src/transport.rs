//! Transport adapter
//!
//! Runs one HTTP exchange on a spawned Tokio task, decodes the payload and
//! hands the outcome to a one-shot completion. Each operation is paired
//! with a cancellation token exposed through [`OperationHandle`].

use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use core_runtime::logging::redact_url_query;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{FilesError, Result};
use crate::types::ApiErrorBody;

/// Handle to an in-flight operation
///
/// Cancelling before the response is delivered guarantees the completion is
/// not invoked. The remote side may still have processed the request.
/// Dropping the handle does not cancel the operation.
#[derive(Debug)]
pub struct OperationHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl OperationHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the task has finished (delivered, failed or cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Token that cancels this operation; useful for tying it to a parent
    /// scope.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait until the operation's task has terminated
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "Files operation task ended abnormally");
        }
    }
}

/// Dispatches built requests through the injected `HttpClient`
#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn HttpClient>,
}

impl Transport {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Start the exchange for `request`.
    ///
    /// `decode` turns a 2xx response into the typed payload; non-2xx
    /// statuses never reach it. `completion` runs once on the spawned task
    /// unless the operation is cancelled first.
    ///
    /// Outside a Tokio runtime nothing is dispatched: `completion` receives
    /// a transport error immediately and `None` is returned.
    pub fn start<T, D, F>(&self, request: HttpRequest, decode: D, completion: F) -> Option<OperationHandle>
    where
        T: Send + 'static,
        D: FnOnce(HttpResponse) -> Result<T> + Send + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "No Tokio runtime available to dispatch request");
                completion(Err(FilesError::Transport(BridgeError::NotAvailable(format!(
                    "Tokio runtime: {}",
                    e
                )))));
                return None;
            }
        };

        let token = CancellationToken::new();
        let task_token = token.clone();
        let client = Arc::clone(&self.client);

        let task = runtime.spawn(async move {
            let method = request.method;
            let url = redact_url_query(&request.url);
            debug!(%method, %url, "Dispatching request");

            let outcome = tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    debug!(%method, %url, "Request cancelled before response");
                    return;
                }
                outcome = client.execute(request) => outcome,
            };

            let result = outcome
                .map_err(FilesError::from)
                .and_then(ensure_success)
                .and_then(decode);

            if task_token.is_cancelled() {
                debug!(%method, %url, "Response dropped after cancellation");
                return;
            }

            if let Err(e) = &result {
                warn!(%method, %url, error = %e, "Request failed");
            }

            completion(result);
        });

        Some(OperationHandle { token, task })
    }
}

/// Map non-2xx responses to a transport error, keeping the API message
fn ensure_success(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiErrorBody>()
        .ok()
        .and_then(|body| body.summary())
        .unwrap_or_else(|| response.text_lossy());

    Err(FilesError::Transport(BridgeError::HttpStatus {
        status: response.status,
        message,
    }))
}

/// Decode a JSON body into `T`
pub fn decode_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    Ok(response.json()?)
}

/// Decode a JSON object and return the value stored under `key`
pub fn decode_envelope<T: DeserializeOwned>(key: &'static str) -> impl FnOnce(HttpResponse) -> Result<T> {
    move |response| {
        let mut envelope: serde_json::Map<String, serde_json::Value> = response.json()?;
        let value = envelope.remove(key).ok_or_else(|| {
            BridgeError::Decode(format!("Response envelope has no '{}' key", key))
        })?;

        serde_json::from_value(value)
            .map_err(|e| FilesError::Transport(BridgeError::Decode(format!("'{}': {}", key, e))))
    }
}
