//! Export result delivered as a file attachment.

use std::io;
use std::path::{Path, PathBuf};

/// A finished export: the XML document and the attachment name it is
/// delivered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub filename: String,
    pub body: String,
}

impl ExportResponse {
    /// MIME type of the body.
    pub const CONTENT_TYPE: &'static str = "application/xml";

    /// Value for a `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }

    /// Save the attachment into `dir`, returning the written path.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.body)?;
        Ok(path)
    }
}
