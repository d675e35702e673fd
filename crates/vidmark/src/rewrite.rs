//! Render hint construction shared by both directive shapes.

use crate::classify::DirectiveShape;
use crate::config::VideoConfig;
use crate::extract::VideoRequest;
use crate::hint::{Element, HintNode, Properties, RenderHint};
use crate::probe::{VideoSource, source_children};

/// Boolean property marking elements produced by this transform.
pub const FIGURE_MARKER: &str = "data-remark-video-figure";

/// Build the render hint for an extracted request and its probed sources.
///
/// The outer element is the configured container tag. Container directives
/// copy all of their attributes onto it; `class` resolves to the configured
/// class, then the directive's own `class`, then nothing. `title` is always
/// taken from the extracted title, replacing a copied attribute of the same
/// name. Its single child is
/// a `<video>` holding the sources followed by any fallback content.
#[must_use]
pub fn build_render_hint(
    request: &VideoRequest<'_>,
    sources: &[VideoSource],
    config: &VideoConfig,
) -> RenderHint {
    RenderHint {
        tag_name: config.container_tag().to_owned(),
        properties: container_properties(request, config),
        children: vec![HintNode::Element(video_element(sources, config))],
    }
}

fn container_properties(request: &VideoRequest<'_>, config: &VideoConfig) -> Properties {
    let mut properties = Properties::new();

    if request.shape == DirectiveShape::Container {
        for (key, value) in request.attributes {
            properties.set(key.as_str(), value.as_str());
        }
    }

    let class = config
        .container_class
        .as_deref()
        .filter(|c| !c.is_empty())
        .or_else(|| request.attributes.get("class").map(String::as_str))
        .filter(|c| !c.is_empty());
    match class {
        Some(class) => properties.set("class", class),
        None => {
            properties.remove("class");
        }
    }

    let title = match request.shape {
        DirectiveShape::Leaf => request.title,
        DirectiveShape::Container => request.title.filter(|_| config.container_title),
    };
    match title {
        Some(title) => properties.set("title", title),
        None => {
            properties.remove("title");
        }
    }

    if config.mark_figure {
        properties.set(FIGURE_MARKER, true);
    }

    properties
}

fn video_element(sources: &[VideoSource], config: &VideoConfig) -> Element {
    let mut video = Element::new("video")
        .with_property("controls", true)
        .with_property("preload", "metadata");
    if config.full_width {
        video = video.with_property("width", "100%");
    }
    video.with_children(source_children(sources, config))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::hint::PropValue;
    use crate::source::MediaVariant;
    use pretty_assertions::assert_eq;

    fn mp4(url: &str) -> VideoSource {
        VideoSource {
            url: url.to_owned(),
            variant: MediaVariant::Mp4,
        }
    }

    fn request<'a>(
        shape: DirectiveShape,
        title: Option<&'a str>,
        attributes: &'a BTreeMap<String, String>,
    ) -> VideoRequest<'a> {
        VideoRequest {
            shape,
            reference: "/a.mp4",
            title,
            attributes,
        }
    }

    fn names(properties: &Properties) -> Vec<&str> {
        properties.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_leaf_hint() {
        let attrs = BTreeMap::new();
        let hint = build_render_hint(
            &request(DirectiveShape::Leaf, Some("Clip"), &attrs),
            &[mp4("/a.mp4")],
            &VideoConfig::new(),
        );

        assert_eq!(hint.tag_name, "div");
        assert_eq!(names(&hint.properties), vec!["title", FIGURE_MARKER]);
        assert_eq!(hint.properties.get_str("title"), Some("Clip"));

        let HintNode::Element(video) = &hint.children[0] else {
            panic!("expected video element");
        };
        assert_eq!(video.tag_name, "video");
        assert_eq!(video.properties.get("controls"), Some(&PropValue::Bool(true)));
        assert_eq!(video.properties.get_str("preload"), Some("metadata"));
        assert_eq!(video.properties.get_str("width"), Some("100%"));
        assert_eq!(video.children.len(), 1);
    }

    #[test]
    fn test_minimal_configuration_omits_optional_properties() {
        let attrs = BTreeMap::new();
        let config = VideoConfig::new().with_mark_figure(false).with_full_width(false);
        let hint = build_render_hint(
            &request(DirectiveShape::Leaf, None, &attrs),
            &[mp4("/a.mp4")],
            &config,
        );

        assert!(hint.properties.is_empty());
        let HintNode::Element(video) = &hint.children[0] else {
            panic!("expected video element");
        };
        assert_eq!(names(&video.properties), vec!["controls", "preload"]);
    }

    #[test]
    fn test_configured_class_overrides_directive_class() {
        let attrs = BTreeMap::from([("class".to_owned(), "mine".to_owned())]);
        let config = VideoConfig::new().with_container_class("video-container");
        let hint = build_render_hint(
            &request(DirectiveShape::Leaf, None, &attrs),
            &[mp4("/a.mp4")],
            &config,
        );
        assert_eq!(hint.properties.get_str("class"), Some("video-container"));
    }

    #[test]
    fn test_directive_class_used_without_config() {
        let attrs = BTreeMap::from([("class".to_owned(), "mine".to_owned())]);
        let hint = build_render_hint(
            &request(DirectiveShape::Leaf, None, &attrs),
            &[mp4("/a.mp4")],
            &VideoConfig::new(),
        );
        assert_eq!(hint.properties.get_str("class"), Some("mine"));
    }

    #[test]
    fn test_leaf_does_not_copy_other_attributes() {
        let attrs = BTreeMap::from([
            ("id".to_owned(), "intro".to_owned()),
            ("src".to_owned(), "/a.mp4".to_owned()),
        ]);
        let hint = build_render_hint(
            &request(DirectiveShape::Leaf, None, &attrs),
            &[mp4("/a.mp4")],
            &VideoConfig::new(),
        );
        assert_eq!(names(&hint.properties), vec![FIGURE_MARKER]);
    }

    #[test]
    fn test_container_copies_attributes_in_order() {
        let attrs = BTreeMap::from([
            ("class".to_owned(), "mine".to_owned()),
            ("id".to_owned(), "intro".to_owned()),
        ]);
        let config = VideoConfig::new().with_container_class("override");
        let hint = build_render_hint(
            &request(DirectiveShape::Container, None, &attrs),
            &[mp4("/a.mp4")],
            &config,
        );
        assert_eq!(names(&hint.properties), vec!["class", "id", FIGURE_MARKER]);
        assert_eq!(hint.properties.get_str("class"), Some("override"));
        assert_eq!(hint.properties.get_str("id"), Some("intro"));
    }

    #[test]
    fn test_container_title_not_propagated_by_default() {
        let attrs = BTreeMap::new();
        let req = request(DirectiveShape::Container, Some("My Clip"), &attrs);

        let hint = build_render_hint(&req, &[mp4("/a.mp4")], &VideoConfig::new());
        assert_eq!(hint.properties.get("title"), None);

        let config = VideoConfig::new().with_container_title(true);
        let hint = build_render_hint(&req, &[mp4("/a.mp4")], &config);
        assert_eq!(hint.properties.get_str("title"), Some("My Clip"));
    }

    #[test]
    fn test_container_title_attribute_replaced_by_label() {
        let attrs = BTreeMap::from([
            ("id".to_owned(), "intro".to_owned()),
            ("title".to_owned(), "From attrs".to_owned()),
        ]);

        let req = request(DirectiveShape::Container, None, &attrs);
        let hint = build_render_hint(&req, &[mp4("/a.mp4")], &VideoConfig::new());
        assert_eq!(names(&hint.properties), vec!["id", FIGURE_MARKER]);

        let req = request(DirectiveShape::Container, Some("My Clip"), &attrs);
        let config = VideoConfig::new().with_container_title(true);
        let hint = build_render_hint(&req, &[mp4("/a.mp4")], &config);
        assert_eq!(names(&hint.properties), vec!["id", "title", FIGURE_MARKER]);
        assert_eq!(hint.properties.get_str("title"), Some("My Clip"));
    }

    #[test]
    fn test_container_tag_applies_to_both_shapes() {
        let attrs = BTreeMap::new();
        let config = VideoConfig::new().with_container_tag("figure");
        for shape in [DirectiveShape::Leaf, DirectiveShape::Container] {
            let hint = build_render_hint(&request(shape, None, &attrs), &[mp4("/a.mp4")], &config);
            assert_eq!(hint.tag_name, "figure");
        }
    }
}
