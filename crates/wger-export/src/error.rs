//! Error types for export requests.

use thiserror::Error;

use crate::Capability;

/// Errors that can occur while handling an export request.
#[derive(Debug, Error)]
pub enum Error {
    /// Language selector was neither `all` nor `user`.
    #[error("bad request: unknown language selector {selector:?}")]
    BadRequest { selector: String },

    /// Caller lacks the capability needed to export.
    #[error("permission denied: missing capability {capability}")]
    PermissionDenied { capability: Capability },

    /// A language-filtered export was requested but no display languages are configured.
    #[error("no display languages configured")]
    NoDisplayLanguages,

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] wger_store::Error),

    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] wger_xml::ExportError),
}

impl Error {
    /// HTTP status code a web layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::PermissionDenied { .. } => 403,
            _ => 500,
        }
    }
}

/// Result type for export requests.
pub type Result<T> = std::result::Result<T, Error>;
