//! Error types for XML export.

use thiserror::Error;

/// Errors that can occur while exporting exercises.
#[derive(Debug, Error)]
pub enum ExportError {
    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Image payload could not be read from storage.
    #[error("failed to read image {path}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generated document was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
