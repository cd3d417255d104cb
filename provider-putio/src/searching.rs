//! Account-wide file search

use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::pipeline::{FilesPipeline, ServiceContext, SEARCH_PATH};
use crate::transport::OperationHandle;
use crate::types::{FetchedFilesPage, SearchParameters};

/// Search entry points
///
/// Results go through the same rewrite as listings, so video hits carry
/// playlist URLs.
#[derive(Clone)]
pub struct Searching {
    pipeline: FilesPipeline,
}

impl Searching {
    pub(crate) fn new(context: ServiceContext) -> Self {
        Self {
            pipeline: FilesPipeline::new(context, SEARCH_PATH),
        }
    }

    #[instrument(skip(self, parameters, completion), fields(query = %parameters.query))]
    pub fn search_files<F>(&self, parameters: &SearchParameters, completion: F) -> Option<OperationHandle>
    where
        F: FnOnce(Result<FetchedFilesPage>) + Send + 'static,
    {
        self.pipeline.first_page(parameters, completion)
    }

    /// Continue a search from a previous page's cursor
    #[instrument(skip_all)]
    pub fn search_next_page<P, F>(&self, parameters: &P, completion: F) -> Option<OperationHandle>
    where
        P: Serialize + ?Sized,
        F: FnOnce(Result<FetchedFilesPage>) + Send + 'static,
    {
        self.pipeline.next_page(parameters, completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilesError;
    use crate::types::{FileType, NextPageParameters};
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
    use bytes::Bytes;
    use core_auth::SharedCredentials;
    use core_runtime::config::ClientConfig;
    use mockall::mock;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn searching(mock_http: MockHttpClient, token: Option<&str>) -> Searching {
        let credentials = match token {
            Some(token) => SharedCredentials::with_token(token),
            None => SharedCredentials::new(),
        };
        let config = ClientConfig::builder()
            .http_client(Arc::new(mock_http))
            .credentials(Arc::new(credentials))
            .build()
            .unwrap();
        Searching::new(ServiceContext::from_config(&config))
    }

    #[tokio::test]
    async fn test_search_files() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                req.method == HttpMethod::Get
                    && req.url == "https://api.put.io/v2/files/search?query=big+buck+bunny&per_page=5"
                    && req.headers.get("Authorization") == Some(&"Bearer abc".to_string())
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse {
                    status: 200,
                    headers: HashMap::new(),
                    body: Bytes::from(
                        r#"{
                            "files": [
                                {"id": 77, "name": "bbb.mp4", "file_type": "VIDEO"},
                                {"id": 78, "name": "bbb.srt", "file_type": "TEXT"}
                            ],
                            "cursor": "s2",
                            "total": 2,
                            "status": "OK"
                        }"#,
                    ),
                })
            });

        let searching = searching(mock_http, Some("abc"));
        let (tx, rx) = oneshot::channel();
        searching.search_files(
            &SearchParameters::new("big buck bunny").with_per_page(5),
            move |result| {
                let _ = tx.send(result);
            },
        );

        let page = rx.await.unwrap().unwrap();
        assert!(page.parent.is_none());
        assert_eq!(page.files[0].file_type, FileType::Video);
        assert_eq!(
            page.files[0].playlist_url(),
            Some("https://api.put.io/v2/files/77/hls/media.m3u8?subtitle_key=all&oauth_token=abc")
        );
        assert!(page.files[1].playlist_url().is_none());
    }

    #[tokio::test]
    async fn test_search_without_token_makes_no_request() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(0);

        let searching = searching(mock_http, None);
        let (tx, rx) = oneshot::channel();
        let handle = searching.search_files(&SearchParameters::new("anything"), move |result| {
            let _ = tx.send(result);
        });

        assert!(handle.is_none());
        assert!(matches!(rx.await.unwrap(), Err(FilesError::Unauthorised)));
    }

    #[tokio::test]
    async fn test_search_next_page_failure_is_not_rewritten() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url == "https://api.put.io/v2/files/search/continue"
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse {
                    status: 400,
                    headers: HashMap::new(),
                    body: Bytes::from_static(
                        br#"{"error_type": "INVALID_CURSOR", "error_message": "Cursor expired", "status_code": 400}"#,
                    ),
                })
            });

        let searching = searching(mock_http, Some("abc"));
        let (tx, rx) = oneshot::channel();
        searching.search_next_page(&NextPageParameters::new("stale"), move |result| {
            let _ = tx.send(result);
        });

        match rx.await.unwrap() {
            Err(FilesError::Transport(BridgeError::HttpStatus { status, message })) => {
                assert_eq!(status, 400);
                assert_eq!(message, "INVALID_CURSOR: Cursor expired");
            }
            other => panic!("expected HTTP status error, got {:?}", other),
        }
    }
}
