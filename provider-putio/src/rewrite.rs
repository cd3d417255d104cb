//! Response rewriting
//!
//! Attaches HLS playlist URLs to the video entries of a fetched page. The
//! token is an explicit argument: callers read it from the credential store
//! immediately before rewriting so a token refreshed mid-request is used.

use tracing::{debug, warn};
use url::Url;

use crate::request::endpoint_url;
use crate::types::{FetchedFilesPage, FileEntry};

/// Subtitle selector sent with every playlist request
pub const SUBTITLE_KEY_ALL: &str = "all";

/// `files/{id}/hls/media.m3u8?subtitle_key=all&oauth_token={token}`
///
/// A missing token yields an empty `oauth_token` rather than dropping the
/// parameter.
pub fn playlist_url(base_url: &Url, file_id: i64, access_token: Option<&str>) -> Option<String> {
    let path = format!("files/{}/hls/media.m3u8", file_id);
    let query = [
        ("subtitle_key".to_string(), SUBTITLE_KEY_ALL.to_string()),
        (
            "oauth_token".to_string(),
            access_token.unwrap_or_default().to_string(),
        ),
    ];

    match endpoint_url(base_url, &path, &query) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            warn!(file_id, error = %e, "Could not build playlist URL");
            None
        }
    }
}

fn rewrite_entry(entry: FileEntry, base_url: &Url, access_token: Option<&str>) -> FileEntry {
    if !entry.is_video() {
        return entry;
    }

    let url = playlist_url(base_url, entry.id, access_token);
    entry.with_playlist_url(url)
}

/// Produce a new page whose video entries carry playlist URLs.
///
/// Order, parent, total, cursor and status are carried over untouched, as
/// are all non-video entries.
pub fn rewrite_page(
    page: FetchedFilesPage,
    base_url: &Url,
    access_token: Option<&str>,
) -> FetchedFilesPage {
    let FetchedFilesPage {
        files,
        parent,
        total,
        cursor,
        status,
    } = page;

    let files: Vec<FileEntry> = files
        .into_iter()
        .map(|entry| rewrite_entry(entry, base_url, access_token))
        .collect();

    debug!(
        files = files.len(),
        videos = files.iter().filter(|f| f.is_video()).count(),
        authenticated = access_token.is_some(),
        "Rewrote fetched page"
    );

    FetchedFilesPage {
        files,
        parent,
        total,
        cursor,
        status,
    }
}
