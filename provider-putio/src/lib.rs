//! # put.io Files Provider
//!
//! Read-side client for the put.io `files/*` API.
//!
//! ## Overview
//!
//! This module provides:
//! - Folder listing with typed filters and cursor pagination
//! - Account-wide search with the same pagination scheme
//! - Status of running archive extractions
//! - HLS playlist URLs attached to every video entry that comes back
//!
//! Every operation takes a completion closure that is called exactly once,
//! unless the returned [`OperationHandle`] is cancelled first. When an
//! operation fails before anything is sent (no access token, bad URL,
//! unserializable parameters) the completion runs immediately and no handle
//! is returned.

pub mod error;
pub mod listing;
pub mod pipeline;
pub mod request;
pub mod rewrite;
pub mod searching;
pub mod service;
pub mod transport;
pub mod types;

pub use error::{FilesError, Result};
pub use listing::Listing;
pub use pipeline::FilesPipeline;
pub use searching::Searching;
pub use service::FilesService;
pub use transport::OperationHandle;
pub use types::{
    Extraction, FetchedFilesPage, FileEntry, FileType, ListParameters, NextPageParameters,
    QueryParameters, SearchParameters, SortBy,
};
