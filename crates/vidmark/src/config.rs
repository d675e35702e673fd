//! Transform configuration.

use std::path::PathBuf;

use crate::hint::HintNode;

/// Tag used for the outer element when none is configured.
pub const DEFAULT_CONTAINER_TAG: &str = "div";

/// Default root directory for media lookups.
pub const DEFAULT_PUBLIC_DIR: &str = "./public";

/// Configuration for [`VideoTransform`](crate::VideoTransform).
///
/// Supplied once at construction and never mutated by the transform.
///
/// # Example
///
/// ```
/// use vidmark::VideoConfig;
///
/// let config = VideoConfig::new()
///     .with_base_url("https://cdn.example.com")
///     .with_public_dir("site/public")
///     .with_container_tag("figure");
///
/// assert_eq!(config.container_tag(), "figure");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoConfig {
    /// Prefix for public source URLs. May be empty.
    pub base_url: String,
    /// Filesystem root under which referenced media lives.
    pub public_dir: PathBuf,
    /// Tag of the outer element. Empty falls back to [`DEFAULT_CONTAINER_TAG`].
    pub container_tag: String,
    /// Class for the outer element, overriding any directive `class`.
    pub container_class: Option<String>,
    /// Content appended after the sources for viewers that play none of them.
    pub fallback_content: Option<HintNode>,
    /// Set `data-remark-video-figure` on the outer element.
    pub mark_figure: bool,
    /// Set `width="100%"` on the video element.
    pub full_width: bool,
    /// Propagate the label title of container directives to the outer element.
    pub container_title: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            container_tag: DEFAULT_CONTAINER_TAG.to_owned(),
            container_class: None,
            fallback_content: None,
            mark_figure: true,
            full_width: true,
            container_title: false,
        }
    }

    /// Set the public URL prefix.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the media root directory.
    #[must_use]
    pub fn with_public_dir(mut self, public_dir: impl Into<PathBuf>) -> Self {
        self.public_dir = public_dir.into();
        self
    }

    /// Set the outer element tag.
    #[must_use]
    pub fn with_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = tag.into();
        self
    }

    /// Set the outer element class.
    #[must_use]
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = Some(class.into());
        self
    }

    /// Set the fallback content.
    #[must_use]
    pub fn with_fallback_content(mut self, content: impl Into<HintNode>) -> Self {
        self.fallback_content = Some(content.into());
        self
    }

    /// Enable or disable the figure marker property.
    #[must_use]
    pub fn with_mark_figure(mut self, enabled: bool) -> Self {
        self.mark_figure = enabled;
        self
    }

    /// Enable or disable full-width sizing of the video element.
    #[must_use]
    pub fn with_full_width(mut self, enabled: bool) -> Self {
        self.full_width = enabled;
        self
    }

    /// Enable or disable title propagation for container directives.
    #[must_use]
    pub fn with_container_title(mut self, enabled: bool) -> Self {
        self.container_title = enabled;
        self
    }

    /// Effective outer element tag.
    #[must_use]
    pub fn container_tag(&self) -> &str {
        if self.container_tag.is_empty() {
            DEFAULT_CONTAINER_TAG
        } else {
            &self.container_tag
        }
    }
}
