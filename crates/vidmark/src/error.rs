//! Error types for the video transform.

use std::path::PathBuf;

/// Error raised while rewriting video directives.
///
/// Ineligible or malformed directives are never errors; they are left
/// untouched. Only genuine I/O failures surface here.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VideoError {
    /// Existence check failed for a reason other than "not found".
    #[error("failed to probe media variant: {}", .path.display())]
    Probe {
        /// Path being checked.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl VideoError {
    /// Create a probe error.
    #[must_use]
    pub fn probe(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Probe {
            path: path.into(),
            source,
        }
    }
}
