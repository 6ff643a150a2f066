// crates/vidshelf-core/src/error.rs
//
// Typed failures for the library and its storage backends. None of these are
// fatal: callers log them, and only some reach the user (see user_message).

use thiserror::Error;

/// Failures raised by a `KeyValueStore` backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the import / delete flows.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Media-library access was not granted. Import is blocked.
    #[error("media library permission was not granted")]
    PermissionDenied,

    /// Copying the picked asset into app storage failed. Nothing was appended.
    #[error("failed to copy {source_uri} into the library: {source}")]
    CopyFailed {
        source_uri: String,
        #[source]
        source: std::io::Error,
    },

    /// The record was appended in memory but the list could not be persisted.
    #[error("failed to persist the video list: {0}")]
    PersistFailed(#[from] StorageError),

    /// Removing a record's backing file failed. Logged only.
    #[error("failed to delete {uri}: {source}")]
    DeleteFileFailed {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    /// The persisted list could not be parsed. Treated as an empty library.
    #[error("persisted video list is malformed: {0}")]
    MalformedData(#[source] serde_json::Error),
}

impl LibraryError {
    /// Title + body shown to the user for errors that surface at all.
    pub fn user_message(&self) -> (&'static str, &'static str) {
        match self {
            LibraryError::PermissionDenied => (
                "Permission required",
                "Access to the media library is needed to add videos.",
            ),
            _ => ("Error", "The video could not be saved."),
        }
    }
}
