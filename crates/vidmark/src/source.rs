//! Source location: probe paths and public URLs for each media variant.

use std::fmt;
use std::path::PathBuf;

use crate::config::VideoConfig;

/// Extension every media reference must end with.
pub const MP4_SUFFIX: &str = "mp4";

/// Encoded variant of a video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MediaVariant {
    /// VP8/VP9 in a WebM container.
    WebM,
    /// Theora in an Ogg container.
    Ogg,
    /// H.264 in an MP4 container. Always emitted.
    Mp4,
}

impl MediaVariant {
    /// Variants in source order.
    pub const ALL: [Self; 3] = [Self::WebM, Self::Ogg, Self::Mp4];

    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::WebM => "webm",
            Self::Ogg => "ogg",
            Self::Mp4 => MP4_SUFFIX,
        }
    }

    /// MIME type for the `type` attribute of a `<source>`.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::WebM => "video/webm",
            Self::Ogg => "video/ogg",
            Self::Mp4 => "video/mp4",
        }
    }
}

impl fmt::Display for MediaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where a variant lives on disk and where it is served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// Encoded variant.
    pub variant: MediaVariant,
    /// Path checked for existence.
    pub probe_path: PathBuf,
    /// URL written into the `src` attribute.
    pub url: String,
}

/// Locations of all variants of one media reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSet {
    /// WebM candidate.
    pub webm: SourceLocation,
    /// Ogg candidate.
    pub ogg: SourceLocation,
    /// Canonical MP4.
    pub mp4: SourceLocation,
}

/// Compute probe paths and public URLs for a media reference.
///
/// The WebM and Ogg locations are derived from the MP4 ones by swapping the
/// trailing `mp4` for the variant extension; nothing before it is touched.
///
/// # Panics
///
/// Panics in debug builds if `reference` does not end with `mp4`. Callers check
/// eligibility first.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use vidmark::{VideoConfig, locate_sources};
///
/// let config = VideoConfig::new()
///     .with_base_url("https://cdn.example.com")
///     .with_public_dir("public");
/// let set = locate_sources("/videos/clip.mp4", &config);
///
/// assert_eq!(set.mp4.url, "https://cdn.example.com/videos/clip.mp4");
/// assert_eq!(set.webm.url, "https://cdn.example.com/videos/clip.webm");
/// assert_eq!(set.ogg.probe_path, Path::new("public/videos/clip.ogg"));
/// ```
#[must_use]
pub fn locate_sources(reference: &str, config: &VideoConfig) -> SourceSet {
    debug_assert!(
        reference.ends_with(MP4_SUFFIX),
        "media reference must end with {MP4_SUFFIX}: {reference}"
    );

    let relative = reference.trim_start_matches('/');
    let url = join_url(&config.base_url, reference);

    let locate = |variant: MediaVariant| SourceLocation {
        variant,
        probe_path: config.public_dir.join(swap_extension(relative, variant)),
        url: swap_extension(&url, variant),
    };

    SourceSet {
        webm: locate(MediaVariant::WebM),
        ogg: locate(MediaVariant::Ogg),
        mp4: SourceLocation {
            variant: MediaVariant::Mp4,
            probe_path: config.public_dir.join(relative),
            url,
        },
    }
}

/// Join a base URL and a reference with exactly one slash between them.
pub(crate) fn join_url(base_url: &str, reference: &str) -> String {
    if base_url.is_empty() {
        return reference.to_owned();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        reference.trim_start_matches('/')
    )
}

/// Replace the trailing three-byte `mp4` suffix with the variant's extension.
fn swap_extension(s: &str, variant: MediaVariant) -> String {
    let stem = s.strip_suffix(MP4_SUFFIX).unwrap_or(s);
    format!("{stem}{}", variant.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(base_url: &str, public_dir: &str) -> VideoConfig {
        VideoConfig::new()
            .with_base_url(base_url)
            .with_public_dir(public_dir)
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://cdn.example.com", "/videos/a.mp4"),
            "https://cdn.example.com/videos/a.mp4"
        );
        assert_eq!(
            join_url("https://cdn.example.com/", "videos/a.mp4"),
            "https://cdn.example.com/videos/a.mp4"
        );
        assert_eq!(join_url("", "/videos/a.mp4"), "/videos/a.mp4");
        assert_eq!(join_url("/static", "a.mp4"), "/static/a.mp4");
    }

    #[test]
    fn test_swap_extension_keeps_prefix() {
        assert_eq!(
            swap_extension("/v/clip.final.mp4", MediaVariant::WebM),
            "/v/clip.final.webm"
        );
        assert_eq!(swap_extension("clipmp4", MediaVariant::Ogg), "clipogg");
        assert_eq!(swap_extension("a.mp4", MediaVariant::Mp4), "a.mp4");
    }

    #[test]
    fn test_locate_sources() {
        let set = locate_sources("/videos/sample.mp4", &config("https://cdn.example.com", "public"));

        assert_eq!(
            set.mp4,
            SourceLocation {
                variant: MediaVariant::Mp4,
                probe_path: PathBuf::from("public/videos/sample.mp4"),
                url: "https://cdn.example.com/videos/sample.mp4".to_owned(),
            }
        );
        assert_eq!(
            set.webm,
            SourceLocation {
                variant: MediaVariant::WebM,
                probe_path: PathBuf::from("public/videos/sample.webm"),
                url: "https://cdn.example.com/videos/sample.webm".to_owned(),
            }
        );
        assert_eq!(
            set.ogg,
            SourceLocation {
                variant: MediaVariant::Ogg,
                probe_path: PathBuf::from("public/videos/sample.ogg"),
                url: "https://cdn.example.com/videos/sample.ogg".to_owned(),
            }
        );
    }

    #[test]
    fn test_locate_relative_reference() {
        let set = locate_sources("clips/a.mp4", &config("", "/srv/www"));
        assert_eq!(set.mp4.probe_path, PathBuf::from("/srv/www/clips/a.mp4"));
        assert_eq!(set.mp4.url, "clips/a.mp4");
        assert_eq!(set.ogg.url, "clips/a.ogg");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_public_dir_preserved() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let public_dir = PathBuf::from(OsStr::from_bytes(b"/srv/pub\xFF"));
        let config = VideoConfig::new().with_public_dir(public_dir.clone());
        let set = locate_sources("/videos/sample.mp4", &config);

        assert_eq!(set.webm.probe_path, public_dir.join("videos/sample.webm"));
        assert_eq!(set.ogg.probe_path, public_dir.join("videos/sample.ogg"));
        assert_eq!(set.mp4.probe_path, public_dir.join("videos/sample.mp4"));
    }

    #[test]
    fn test_variant_metadata() {
        let mimes: Vec<_> = MediaVariant::ALL.iter().map(|v| v.mime_type()).collect();
        assert_eq!(mimes, vec!["video/webm", "video/ogg", "video/mp4"]);
        assert_eq!(MediaVariant::WebM.to_string(), "webm");
    }
}
