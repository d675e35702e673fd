//! Media reference and title extraction for both directive shapes.
//!
//! This is the only shape-specific step. Everything downstream works on the
//! extracted [`VideoRequest`].

use std::collections::BTreeMap;

use crate::classify::DirectiveShape;
use crate::source::MP4_SUFFIX;
use crate::tree::{Directive, Node};

/// Data extracted from an eligible video directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoRequest<'a> {
    /// Shape the request was extracted from.
    pub shape: DirectiveShape,
    /// Path of the canonical MP4, relative to the public root.
    pub reference: &'a str,
    /// Optional caption.
    pub title: Option<&'a str>,
    /// Directive attributes.
    pub attributes: &'a BTreeMap<String, String>,
}

/// Why a video directive was passed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Leaf directive has no `src` attribute.
    MissingSrc,
    /// Container directive has no children.
    Empty,
    /// Content is not a paragraph with a text child where one is expected.
    UnexpectedShape,
    /// Reference does not end with `mp4`.
    NotMp4,
}

/// Extract the request for a directive of the given shape.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the directive is not eligible.
pub fn extract(
    directive: &Directive,
    shape: DirectiveShape,
) -> Result<VideoRequest<'_>, SkipReason> {
    match shape {
        DirectiveShape::Leaf => extract_leaf(directive),
        DirectiveShape::Container => extract_container(directive),
    }
}

/// Extract from `::video[title]{src=...}`.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the directive is not eligible.
pub fn extract_leaf(directive: &Directive) -> Result<VideoRequest<'_>, SkipReason> {
    let reference = directive.attribute("src").ok_or(SkipReason::MissingSrc)?;
    require_mp4(reference)?;

    Ok(VideoRequest {
        shape: DirectiveShape::Leaf,
        reference,
        title: leaf_title(directive),
        attributes: &directive.attributes,
    })
}

/// Title of a leaf directive: its first child, when that child is text.
fn leaf_title(directive: &Directive) -> Option<&str> {
    directive.children.first().and_then(Node::as_text)
}

/// Extract from a container directive.
///
/// Two layouts are accepted:
///
/// ```text
/// :::video              :::video[My Clip]
/// /videos/clip.mp4      /videos/clip.mp4
/// :::                   :::
/// ```
///
/// In the labeled layout the first paragraph is the label and supplies the
/// title; the reference comes from the second paragraph.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the directive is not eligible.
pub fn extract_container(directive: &Directive) -> Result<VideoRequest<'_>, SkipReason> {
    let (first, second) = match directive.children.as_slice() {
        [] => return Err(SkipReason::Empty),
        [first, rest @ ..] => (first, rest.first()),
    };

    let Node::Paragraph(first) = first else {
        return Err(SkipReason::UnexpectedShape);
    };
    let Some(first_child) = first.children.first() else {
        return Err(SkipReason::UnexpectedShape);
    };

    let (title, url_node) = if first.directive_label {
        let Some(Node::Paragraph(second)) = second else {
            return Err(SkipReason::UnexpectedShape);
        };
        let Some(url_node) = second.children.first() else {
            return Err(SkipReason::UnexpectedShape);
        };
        (first_child.as_text(), url_node)
    } else {
        (None, first_child)
    };

    let reference = url_node.as_text().ok_or(SkipReason::UnexpectedShape)?;
    require_mp4(reference)?;

    Ok(VideoRequest {
        shape: DirectiveShape::Container,
        reference,
        title,
        attributes: &directive.attributes,
    })
}

fn require_mp4(reference: &str) -> Result<(), SkipReason> {
    if reference.ends_with(MP4_SUFFIX) {
        Ok(())
    } else {
        Err(SkipReason::NotMp4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Other;

    fn leaf(src: Option<&str>) -> Directive {
        let directive = Directive::new("video");
        match src {
            Some(src) => directive.with_attribute("src", src),
            None => directive,
        }
    }

    fn container(children: Vec<Node>) -> Directive {
        let mut directive = Directive::new("video");
        directive.children = children;
        directive
    }

    #[test]
    fn test_leaf_reference() {
        let directive = leaf(Some("/videos/sample.mp4"));
        let request = extract_leaf(&directive).unwrap();
        assert_eq!(request.reference, "/videos/sample.mp4");
        assert_eq!(request.title, None);
        assert_eq!(request.shape, DirectiveShape::Leaf);
    }

    #[test]
    fn test_leaf_title_from_text_child() {
        let directive = leaf(Some("/a.mp4")).with_child(Node::text("My Clip"));
        assert_eq!(extract_leaf(&directive).unwrap().title, Some("My Clip"));
    }

    #[test]
    fn test_leaf_title_ignores_non_text() {
        let directive = leaf(Some("/a.mp4")).with_child(Node::paragraph(vec![Node::text("x")]));
        assert_eq!(extract_leaf(&directive).unwrap().title, None);
    }

    #[test]
    fn test_leaf_missing_src() {
        assert_eq!(extract_leaf(&leaf(None)), Err(SkipReason::MissingSrc));
    }

    #[test]
    fn test_leaf_not_mp4() {
        assert_eq!(extract_leaf(&leaf(Some("/a.webm"))), Err(SkipReason::NotMp4));
        assert_eq!(extract_leaf(&leaf(Some("/a.MP4"))), Err(SkipReason::NotMp4));
    }

    #[test]
    fn test_leaf_suffix_only_check() {
        assert!(extract_leaf(&leaf(Some("clipmp4"))).is_ok());
    }

    #[test]
    fn test_container_plain() {
        let directive = container(vec![Node::paragraph(vec![Node::text("/videos/sample.mp4")])]);
        let request = extract_container(&directive).unwrap();
        assert_eq!(request.reference, "/videos/sample.mp4");
        assert_eq!(request.title, None);
        assert_eq!(request.shape, DirectiveShape::Container);
    }

    #[test]
    fn test_container_labeled() {
        let directive = container(vec![
            Node::label(vec![Node::text("My Clip")]),
            Node::paragraph(vec![Node::text("/videos/sample.mp4")]),
        ]);
        let request = extract_container(&directive).unwrap();
        assert_eq!(request.title, Some("My Clip"));
        assert_eq!(request.reference, "/videos/sample.mp4");
    }

    #[test]
    fn test_container_label_without_text_has_no_title() {
        let emphasis = Node::Other(Other {
            kind: "emphasis".to_owned(),
            value: None,
            children: vec![Node::text("clip")],
        });
        let directive = container(vec![
            Node::label(vec![emphasis]),
            Node::paragraph(vec![Node::text("/a.mp4")]),
        ]);
        let request = extract_container(&directive).unwrap();
        assert_eq!(request.title, None);
        assert_eq!(request.reference, "/a.mp4");
    }

    #[test]
    fn test_container_empty() {
        assert_eq!(extract_container(&container(vec![])), Err(SkipReason::Empty));
    }

    #[test]
    fn test_container_first_not_paragraph() {
        let directive = container(vec![Node::text("/a.mp4")]);
        assert_eq!(extract_container(&directive), Err(SkipReason::UnexpectedShape));
    }

    #[test]
    fn test_container_empty_paragraph() {
        let directive = container(vec![Node::paragraph(vec![])]);
        assert_eq!(extract_container(&directive), Err(SkipReason::UnexpectedShape));
    }

    #[test]
    fn test_container_label_without_second_paragraph() {
        let directive = container(vec![Node::label(vec![Node::text("Title")])]);
        assert_eq!(extract_container(&directive), Err(SkipReason::UnexpectedShape));
    }

    #[test]
    fn test_container_label_with_empty_second_paragraph() {
        let directive = container(vec![
            Node::label(vec![Node::text("Title")]),
            Node::paragraph(vec![]),
        ]);
        assert_eq!(extract_container(&directive), Err(SkipReason::UnexpectedShape));
    }

    #[test]
    fn test_container_reference_not_text() {
        let link = Node::Other(Other {
            kind: "link".to_owned(),
            value: None,
            children: vec![Node::text("/a.mp4")],
        });
        let directive = container(vec![Node::paragraph(vec![link])]);
        assert_eq!(extract_container(&directive), Err(SkipReason::UnexpectedShape));
    }

    #[test]
    fn test_container_not_mp4() {
        let directive = container(vec![Node::paragraph(vec![Node::text("/a.ogg")])]);
        assert_eq!(extract_container(&directive), Err(SkipReason::NotMp4));
    }

    #[test]
    fn test_extract_dispatches_on_shape() {
        let directive = leaf(Some("/a.mp4"));
        assert!(extract(&directive, DirectiveShape::Leaf).is_ok());
        assert_eq!(
            extract(&directive, DirectiveShape::Container),
            Err(SkipReason::Empty)
        );
    }
}
