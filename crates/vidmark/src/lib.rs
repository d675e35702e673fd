//! Video directive transform for directive-aware markdown trees.
//!
//! Rewrites `video` directives into a container element holding a `<video>`
//! with one `<source>` per encoded variant found on disk:
//!
//! ```text
//! ::video[Intro]{src=/videos/intro.mp4}
//!
//! :::video[Intro]
//! /videos/intro.mp4
//! :::
//! ```
//!
//! # Architecture
//!
//! The transform works on a [`Document`] produced by an upstream parser and
//! writes a [`RenderHint`] into each eligible directive for a downstream
//! renderer:
//!
//! - [`classify`]: recognizes leaf and container `video` directives
//! - [`extract`]: pulls the MP4 reference and optional title out of either shape
//! - [`locate_sources`]: computes probe paths and public URLs for every variant
//! - [`probe_sources`]: checks which variants exist (WebM, Ogg, then MP4 always)
//! - [`build_render_hint`]: builds the element tree shared by both shapes
//! - [`VideoTransform`]: walks the tree and applies all of the above
//!
//! Ineligible directives are passed through untouched. Only I/O failures
//! during probing are reported, as [`VideoError`].
//!
//! # Example
//!
//! ```no_run
//! use vidmark::{Directive, Document, Node, VideoConfig, VideoTransform};
//!
//! let mut doc = Document::new(vec![Node::LeafDirective(
//!     Directive::new("video").with_attribute("src", "/videos/intro.mp4"),
//! )]);
//!
//! let config = VideoConfig::new()
//!     .with_base_url("https://cdn.example.com")
//!     .with_public_dir("public");
//! VideoTransform::new(config).apply(&mut doc)?;
//! # Ok::<(), vidmark::VideoError>(())
//! ```

mod classify;
mod config;
mod error;
mod extract;
mod hint;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod probe;
mod rewrite;
mod source;
mod transform;
mod tree;

pub use classify::{DirectiveShape, VIDEO_DIRECTIVE, classify};
pub use config::{DEFAULT_CONTAINER_TAG, DEFAULT_PUBLIC_DIR, VideoConfig};
pub use error::VideoError;
pub use extract::{SkipReason, VideoRequest, extract, extract_container, extract_leaf};
pub use hint::{Element, HintNode, PropValue, Properties, RenderHint};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockProbe;
#[cfg(feature = "async")]
pub use probe::{AsyncPathProbe, TokioFsProbe, probe_sources_async};
pub use probe::{FsProbe, PathProbe, VideoSource, probe_sources, source_children};
pub use rewrite::{FIGURE_MARKER, build_render_hint};
pub use source::{MP4_SUFFIX, MediaVariant, SourceLocation, SourceSet, locate_sources};
pub use transform::{TransformReport, VideoTransform};
pub use tree::{Directive, Document, Node, Other, Paragraph, TextValue};
