//! put.io API types
//!
//! Wire structures for the `files/*` endpoints plus the typed parameter
//! objects callers fill in.

use serde::{Deserialize, Serialize};

/// Kind of a put.io file as reported in `file_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Folder,
    File,
    Audio,
    Video,
    Image,
    Archive,
    Pdf,
    Text,
    Swf,
    /// A type this client does not know yet
    #[default]
    #[serde(other)]
    Unknown,
}

impl FileType {
    /// Wire name, as accepted by the `file_type` filter
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Folder => "FOLDER",
            FileType::File => "FILE",
            FileType::Audio => "AUDIO",
            FileType::Video => "VIDEO",
            FileType::Image => "IMAGE",
            FileType::Archive => "ARCHIVE",
            FileType::Pdf => "PDF",
            FileType::Text => "TEXT",
            FileType::Swf => "SWF",
            FileType::Unknown => "UNKNOWN",
        }
    }
}

/// A file or folder
///
/// Everything except `playlist_url` mirrors the server payload. The playlist
/// URL is never read from the wire; it is attached to video entries by the
/// response rewriter after a listing or search succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub file_type: FileType,

    #[serde(default)]
    pub parent_id: Option<i64>,

    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub content_type: Option<String>,

    /// Creation time as sent by the server (ISO 8601, no zone)
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub crc32: Option<String>,

    #[serde(default)]
    pub extension: Option<String>,

    #[serde(default)]
    pub is_mp4_available: bool,

    #[serde(default)]
    pub is_shared: bool,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub screenshot: Option<String>,

    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    playlist_url: Option<String>,
}

impl FileEntry {
    pub fn new(id: i64, name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            id,
            name: name.into(),
            file_type,
            parent_id: None,
            size: None,
            content_type: None,
            created_at: None,
            updated_at: None,
            crc32: None,
            extension: None,
            is_mp4_available: false,
            is_shared: false,
            icon: None,
            screenshot: None,
            playlist_url: None,
        }
    }

    pub fn is_video(&self) -> bool {
        self.file_type == FileType::Video
    }

    pub fn is_folder(&self) -> bool {
        self.file_type == FileType::Folder
    }

    /// HLS playlist URL, present only on rewritten video entries
    pub fn playlist_url(&self) -> Option<&str> {
        self.playlist_url.as_deref()
    }

    /// Copy of this entry carrying the given playlist URL
    pub(crate) fn with_playlist_url(self, playlist_url: Option<String>) -> Self {
        Self {
            playlist_url,
            ..self
        }
    }
}

/// One page of a listing or search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedFilesPage {
    /// Entries in server order
    #[serde(default)]
    pub files: Vec<FileEntry>,

    /// Folder being listed (absent for searches)
    #[serde(default)]
    pub parent: Option<FileEntry>,

    #[serde(default)]
    pub total: Option<u64>,

    /// Opaque continuation cursor; `None` on the last page
    #[serde(default)]
    pub cursor: Option<String>,

    #[serde(default)]
    pub status: String,
}

impl FetchedFilesPage {
    pub fn has_more(&self) -> bool {
        self.cursor.as_deref().is_some_and(|cursor| !cursor.is_empty())
    }

    /// Parameters that continue from this page, if there is a next page
    pub fn next_page_parameters(&self) -> Option<NextPageParameters> {
        if !self.has_more() {
            return None;
        }
        self.cursor.clone().map(NextPageParameters::new)
    }
}

/// Sort order accepted by `files/list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    NameAsc,
    NameDesc,
    SizeAsc,
    SizeDesc,
    DateAsc,
    DateDesc,
    ModifiedAsc,
    ModifiedDesc,
    TypeAsc,
    TypeDesc,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::NameAsc => "NAME_ASC",
            SortBy::NameDesc => "NAME_DESC",
            SortBy::SizeAsc => "SIZE_ASC",
            SortBy::SizeDesc => "SIZE_DESC",
            SortBy::DateAsc => "DATE_ASC",
            SortBy::DateDesc => "DATE_DESC",
            SortBy::ModifiedAsc => "MODIFIED_ASC",
            SortBy::ModifiedDesc => "MODIFIED_DESC",
            SortBy::TypeAsc => "TYPE_ASC",
            SortBy::TypeDesc => "TYPE_DESC",
        }
    }
}

/// Parameters encoded into a request's query string
pub trait QueryParameters {
    /// `(name, value)` pairs in a stable order; unset criteria are omitted
    fn query_items(&self) -> Vec<(String, String)>;
}

fn join_file_types(file_types: &[FileType]) -> String {
    file_types
        .iter()
        .map(FileType::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Filters for `files/list`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParameters {
    /// Folder to list; `0` is the account root
    pub parent_id: i64,
    pub per_page: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub content_type: Option<String>,
    pub file_types: Vec<FileType>,
    /// Ask the server to include stream URLs
    pub stream_url: bool,
    /// Ask the server to include MP4 conversion status
    pub mp4_status: bool,
    /// Include hidden files
    pub hidden: bool,
    /// Ask the server to include the total count
    pub total: bool,
}

impl ListParameters {
    pub fn folder(parent_id: i64) -> Self {
        Self {
            parent_id,
            ..Self::default()
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_types(mut self, file_types: impl IntoIterator<Item = FileType>) -> Self {
        self.file_types = file_types.into_iter().collect();
        self
    }

    pub fn with_stream_url(mut self, enabled: bool) -> Self {
        self.stream_url = enabled;
        self
    }

    pub fn with_mp4_status(mut self, enabled: bool) -> Self {
        self.mp4_status = enabled;
        self
    }

    pub fn with_hidden(mut self, enabled: bool) -> Self {
        self.hidden = enabled;
        self
    }

    pub fn with_total(mut self, enabled: bool) -> Self {
        self.total = enabled;
        self
    }
}

impl QueryParameters for ListParameters {
    fn query_items(&self) -> Vec<(String, String)> {
        let mut items = vec![("parent_id".to_string(), self.parent_id.to_string())];

        if let Some(per_page) = self.per_page {
            items.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            items.push(("sort_by".to_string(), sort_by.as_str().to_string()));
        }
        if let Some(content_type) = &self.content_type {
            items.push(("content_type".to_string(), content_type.clone()));
        }
        if !self.file_types.is_empty() {
            items.push(("file_type".to_string(), join_file_types(&self.file_types)));
        }

        let flags = [
            ("stream_url", self.stream_url),
            ("mp4_status", self.mp4_status),
            ("hidden", self.hidden),
            ("total", self.total),
        ];
        items.extend(
            flags
                .iter()
                .filter(|(_, enabled)| *enabled)
                .map(|(name, _)| (name.to_string(), "true".to_string())),
        );

        items
    }
}

/// Criteria for `files/search`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParameters {
    pub query: String,
    pub per_page: Option<u32>,
    pub file_types: Vec<FileType>,
}

impl SearchParameters {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_file_types(mut self, file_types: impl IntoIterator<Item = FileType>) -> Self {
        self.file_types = file_types.into_iter().collect();
        self
    }
}

impl QueryParameters for SearchParameters {
    fn query_items(&self) -> Vec<(String, String)> {
        let mut items = vec![("query".to_string(), self.query.clone())];

        if let Some(per_page) = self.per_page {
            items.push(("per_page".to_string(), per_page.to_string()));
        }
        if !self.file_types.is_empty() {
            items.push(("file_type".to_string(), join_file_types(&self.file_types)));
        }

        items
    }
}

/// Body of a `*/continue` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPageParameters {
    /// Cursor from the previous page, passed back verbatim
    pub cursor: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl NextPageParameters {
    pub fn new(cursor: impl Into<String>) -> Self {
        Self {
            cursor: cursor.into(),
            per_page: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}

/// Archive extraction job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub num_parts: Option<u32>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error_type: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub status_code: Option<u16>,
}

impl ApiErrorBody {
    /// Human-readable summary, if the envelope carried anything useful
    pub fn summary(&self) -> Option<String> {
        match (&self.error_type, &self.error_message) {
            (Some(kind), Some(message)) => Some(format!("{}: {}", kind, message)),
            (None, Some(message)) => Some(message.clone()),
            (Some(kind), None) => Some(kind.clone()),
            (None, None) => None,
        }
    }
}
