//! Variant probing: which encodings exist next to the canonical MP4.

use std::io;
use std::path::Path;

use crate::config::VideoConfig;
use crate::error::VideoError;
use crate::hint::{Element, HintNode};
use crate::source::{MediaVariant, SourceLocation, SourceSet};

/// Filesystem existence check used by the transform.
///
/// Implementations must return `Ok(false)` for a missing path and `Err` for
/// any other failure (permission denied, I/O error), which the transform
/// propagates.
pub trait PathProbe {
    /// Check whether `path` exists.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

impl<F> PathProbe for F
where
    F: Fn(&Path) -> io::Result<bool>,
{
    fn exists(&self, path: &Path) -> io::Result<bool> {
        self(path)
    }
}

/// [`PathProbe`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        absent_if_unreachable(path.try_exists())
    }
}

/// Treat paths that cannot name a file (a parent is not a directory, a
/// component is too long) as missing rather than failed.
fn absent_if_unreachable(result: io::Result<bool>) -> io::Result<bool> {
    match result {
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotADirectory | io::ErrorKind::InvalidFilename
            ) =>
        {
            Ok(false)
        }
        other => other,
    }
}

/// A usable `<source>` for a video element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VideoSource {
    /// Public URL.
    pub url: String,
    /// Encoded variant, which determines the MIME type.
    pub variant: MediaVariant,
}

impl VideoSource {
    /// MIME type of this source.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.variant.mime_type()
    }

    /// Render as a `<source src=".." type="..">` element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::new("source")
            .with_property("src", self.url.as_str())
            .with_property("type", self.mime_type())
    }
}

impl From<&SourceLocation> for VideoSource {
    fn from(location: &SourceLocation) -> Self {
        Self {
            url: location.url.clone(),
            variant: location.variant,
        }
    }
}

/// Probe the optional variants of a source set.
///
/// Returns the usable sources in fixed order: WebM and Ogg when their files
/// exist, then MP4 unconditionally. Every call hits the probe; nothing is
/// cached between directives.
///
/// # Errors
///
/// Returns [`VideoError::Probe`] when an existence check fails.
pub fn probe_sources<P: PathProbe>(
    set: &SourceSet,
    probe: &P,
) -> Result<Vec<VideoSource>, VideoError> {
    let mut sources = Vec::with_capacity(3);

    for location in [&set.webm, &set.ogg] {
        let exists = probe
            .exists(&location.probe_path)
            .map_err(|e| VideoError::probe(&location.probe_path, e))?;
        tracing::trace!(
            path = %location.probe_path.display(),
            variant = %location.variant,
            exists,
            "Probed media variant"
        );
        if exists {
            sources.push(VideoSource::from(location));
        }
    }

    sources.push(VideoSource::from(&set.mp4));
    Ok(sources)
}

/// Child content of the video element: sources in order, then fallback content.
#[must_use]
pub fn source_children(sources: &[VideoSource], config: &VideoConfig) -> Vec<HintNode> {
    sources
        .iter()
        .map(|source| HintNode::Element(source.to_element()))
        .chain(config.fallback_content.iter().cloned())
        .collect()
}

/// Asynchronous existence check.
///
/// Same contract as [`PathProbe`].
#[cfg(feature = "async")]
pub trait AsyncPathProbe {
    /// Check whether `path` exists.
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = io::Result<bool>> + Send;
}

/// [`AsyncPathProbe`] backed by `tokio::fs`.
#[cfg(feature = "async")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioFsProbe;

#[cfg(feature = "async")]
impl AsyncPathProbe for TokioFsProbe {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        absent_if_unreachable(tokio::fs::try_exists(path).await)
    }
}

/// Asynchronous counterpart of [`probe_sources`].
///
/// # Errors
///
/// Returns [`VideoError::Probe`] when an existence check fails.
#[cfg(feature = "async")]
pub async fn probe_sources_async<P: AsyncPathProbe>(
    set: &SourceSet,
    probe: &P,
) -> Result<Vec<VideoSource>, VideoError> {
    let mut sources = Vec::with_capacity(3);

    for location in [&set.webm, &set.ogg] {
        let exists = probe
            .exists(&location.probe_path)
            .await
            .map_err(|e| VideoError::probe(&location.probe_path, e))?;
        tracing::trace!(
            path = %location.probe_path.display(),
            variant = %location.variant,
            exists,
            "Probed media variant"
        );
        if exists {
            sources.push(VideoSource::from(location));
        }
    }

    sources.push(VideoSource::from(&set.mp4));
    Ok(sources)
}
