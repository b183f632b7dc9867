//! Error types for static file loading.
//!
//! Every variant is answered with the same 404 response; the distinction only
//! matters for what gets logged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a request path into file bytes.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Request path contains a `..` segment.
    #[error("path traversal rejected: {0}")]
    Traversal(String),

    /// The resolved file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Missing files are routine and are not worth a warning
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
