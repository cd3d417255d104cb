//! Folder listing and extraction status

use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::pipeline::{FilesPipeline, ServiceContext, LIST_PATH};
use crate::request::ApiRequest;
use crate::transport::{decode_envelope, OperationHandle};
use crate::types::{Extraction, FetchedFilesPage, ListParameters};

pub const EXTRACTIONS_PATH: &str = "files/extract";
const EXTRACTIONS_KEY: &str = "extractions";

/// Listing entry points
///
/// Every method returns `None` when it failed before dispatch; the
/// completion has then already been called with the error.
#[derive(Clone)]
pub struct Listing {
    pipeline: FilesPipeline,
}

impl Listing {
    pub(crate) fn new(context: ServiceContext) -> Self {
        Self {
            pipeline: FilesPipeline::new(context, LIST_PATH),
        }
    }

    /// List a folder. Video entries come back with playlist URLs attached.
    #[instrument(skip(self, parameters, completion), fields(parent_id = parameters.parent_id))]
    pub fn fetch_files<F>(&self, parameters: &ListParameters, completion: F) -> Option<OperationHandle>
    where
        F: FnOnce(Result<FetchedFilesPage>) + Send + 'static,
    {
        self.pipeline.first_page(parameters, completion)
    }

    /// Continue a listing from a previous page's cursor.
    ///
    /// `parameters` is normally [`crate::NextPageParameters`]; anything that
    /// fails to serialize is reported as `InvalidParameters`.
    #[instrument(skip_all)]
    pub fn fetch_next_page<P, F>(&self, parameters: &P, completion: F) -> Option<OperationHandle>
    where
        P: Serialize + ?Sized,
        F: FnOnce(Result<FetchedFilesPage>) + Send + 'static,
    {
        self.pipeline.next_page(parameters, completion)
    }

    /// Archive extractions currently running on the account
    #[instrument(skip_all)]
    pub fn active_extractions<F>(&self, completion: F) -> Option<OperationHandle>
    where
        F: FnOnce(Result<Vec<Extraction>>) + Send + 'static,
    {
        self.pipeline.context().dispatch(
            || Ok(ApiRequest::get(EXTRACTIONS_PATH)),
            decode_envelope::<Vec<Extraction>>(EXTRACTIONS_KEY),
            completion,
        )
    }
}
