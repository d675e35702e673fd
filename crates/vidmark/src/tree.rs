//! Document tree consumed by the video transform.
//!
//! The tree is produced by an upstream directive-aware parser. Node shapes are
//! decided once, at parse time, so the transform pattern-matches on [`Node`]
//! instead of probing node structure at runtime.

use std::collections::BTreeMap;

use crate::hint::RenderHint;

/// Root of a parsed document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    /// Top-level nodes in document order.
    pub children: Vec<Node>,
}

impl Document {
    /// Create a document from its top-level nodes.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Node {
    /// Leaf directive: `::name[label]{attrs}`.
    LeafDirective(Directive),
    /// Container directive: `:::name` ... `:::`.
    ContainerDirective(Directive),
    /// Paragraph of phrasing content.
    Paragraph(Paragraph),
    /// Plain text.
    Text(TextValue),
    /// Anything the transform does not own. Walks still descend into it.
    Other(Other),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(TextValue {
            value: value.into(),
        })
    }

    /// Create an unlabeled paragraph.
    #[must_use]
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::Paragraph(Paragraph {
            children,
            directive_label: false,
        })
    }

    /// Create a paragraph flagged as a container directive label.
    #[must_use]
    pub fn label(children: Vec<Node>) -> Self {
        Self::Paragraph(Paragraph {
            children,
            directive_label: true,
        })
    }

    /// Value of a text node, `None` for every other variant.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(&text.value),
            _ => None,
        }
    }

    /// Child nodes, empty for text.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::LeafDirective(d) | Self::ContainerDirective(d) => &d.children,
            Self::Paragraph(p) => &p.children,
            Self::Other(o) => &o.children,
            Self::Text(_) => &[],
        }
    }

    /// Mutable child nodes, empty for text.
    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Self::LeafDirective(d) | Self::ContainerDirective(d) => &mut d.children,
            Self::Paragraph(p) => &mut p.children,
            Self::Other(o) => &mut o.children,
            Self::Text(_) => &mut [],
        }
    }
}

/// A named directive with attributes, children and a render hint slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Directive {
    /// Directive name (`video` for the nodes this crate rewrites).
    pub name: String,
    /// Attributes from `{...}`. Keys are unique.
    pub attributes: BTreeMap<String, String>,
    /// Nested content.
    pub children: Vec<Node>,
    /// Rendering override written by transforms. `None` means default rendering.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub render_hint: Option<RenderHint>,
}

impl Directive {
    /// Create a directive with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Paragraph node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Paragraph {
    /// Phrasing content.
    pub children: Vec<Node>,
    /// Set on the first paragraph of a container directive when it holds the `[label]`.
    pub directive_label: bool,
}

/// Text node payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextValue {
    /// Literal text.
    pub value: String,
}

/// Node of a kind the transform does not interpret.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Other {
    /// Free-form node kind (e.g. `"markdown"`, `"heading"`).
    pub kind: String,
    /// Literal payload, if the kind carries one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    /// Nested nodes.
    pub children: Vec<Node>,
}

impl Other {
    /// Create a childless node carrying a literal value.
    #[must_use]
    pub fn literal(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text() {
        assert_eq!(Node::text("hello").as_text(), Some("hello"));
        assert_eq!(Node::paragraph(vec![]).as_text(), None);
    }

    #[test]
    fn test_children_of_text_is_empty() {
        let mut node = Node::text("x");
        assert!(node.children().is_empty());
        assert!(node.children_mut().is_empty());
    }

    #[test]
    fn test_directive_builder() {
        let directive = Directive::new("video")
            .with_attribute("src", "/a.mp4")
            .with_child(Node::text("Caption"));

        assert_eq!(directive.name, "video");
        assert_eq!(directive.attribute("src"), Some("/a.mp4"));
        assert_eq!(directive.attribute("class"), None);
        assert_eq!(directive.children.len(), 1);
        assert!(directive.render_hint.is_none());
    }

    #[test]
    fn test_label_paragraph_is_flagged() {
        match Node::label(vec![Node::text("Title")]) {
            Node::Paragraph(p) => assert!(p.directive_label),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }
}
