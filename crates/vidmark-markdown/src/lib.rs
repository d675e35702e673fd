//! Markdown front end for the vidmark video transform.
//!
//! Parses block directives into a [`vidmark::Document`], runs a
//! [`VideoTransform`] over it and renders the result to HTML. Markdown outside
//! directives is rendered with pulldown-cmark.
//!
//! # Example
//!
//! ```no_run
//! use vidmark::{VideoConfig, VideoTransform};
//! use vidmark_markdown::render_markdown;
//!
//! let config = VideoConfig::new().with_base_url("https://cdn.example.com");
//! let html = render_markdown("::video{src=/videos/intro.mp4}", &VideoTransform::new(config))?;
//! assert!(html.contains("<video"));
//! # Ok::<(), vidmark::VideoError>(())
//! ```

mod attrs;
mod fence;
mod html;
mod parser;
mod syntax;

pub use html::{escape_html, render_html};
pub use parser::{MARKDOWN_KIND, parse_document};

use vidmark::{PathProbe, VideoError, VideoTransform};

/// Parse markdown, apply the video transform and render HTML.
pub fn render_markdown<P: PathProbe>(
    input: &str,
    transform: &VideoTransform<P>,
) -> Result<String, VideoError> {
    let mut document = parse_document(input);
    transform.apply(&mut document)?;
    Ok(render_html(&document))
}
