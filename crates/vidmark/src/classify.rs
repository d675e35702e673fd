//! Video directive classification.

use crate::tree::{Directive, Node};

/// Directive name handled by this crate.
pub const VIDEO_DIRECTIVE: &str = "video";

/// Shape of a video directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveShape {
    /// `::video{src=...}[title]`
    Leaf,
    /// `:::video` with one or two paragraphs of content.
    Container,
}

/// Classify a node as a leaf or container `video` directive.
///
/// Returns `None` for every other node, including directives with a different
/// name and directives that already carry a render hint.
#[must_use]
pub fn classify(node: &Node) -> Option<DirectiveShape> {
    match node {
        Node::LeafDirective(d) if is_pending_video(d) => Some(DirectiveShape::Leaf),
        Node::ContainerDirective(d) if is_pending_video(d) => Some(DirectiveShape::Container),
        _ => None,
    }
}

fn is_pending_video(directive: &Directive) -> bool {
    directive.name == VIDEO_DIRECTIVE && directive.render_hint.is_none()
}
