//! In-memory path probe for testing.
//!
//! Provides [`MockProbe`] for exercising the transform without touching the
//! filesystem.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::probe::PathProbe;

/// Mock probe backed by a set of existing paths.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use vidmark::{MockProbe, PathProbe};
///
/// let probe = MockProbe::new().with_path("public/a.webm");
/// assert!(probe.exists(Path::new("public/a.webm")).unwrap());
/// assert!(!probe.exists(Path::new("public/a.ogg")).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MockProbe {
    existing: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
    calls: AtomicUsize,
}

impl MockProbe {
    /// Create a probe where nothing exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as existing.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }

    /// Make checks on a path fail with `PermissionDenied`.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Number of existence checks performed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl PathProbe for MockProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        Ok(self.existing.contains(path))
    }
}

#[cfg(feature = "async")]
impl crate::probe::AsyncPathProbe for MockProbe {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        PathProbe::exists(self, path)
    }
}
