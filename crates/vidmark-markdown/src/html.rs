//! HTML rendering of a transformed document.

use std::fmt::Write;

use pulldown_cmark::{Options, Parser, html};
use vidmark::{Directive, Document, HintNode, Node, Properties, PropValue};

use crate::attrs::is_attribute_name;
use crate::parser::MARKDOWN_KIND;

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Render a document to HTML.
///
/// Directives carrying a render hint are rendered as that hint. Directives
/// without one fall back to a `<div>` around their children. Verbatim
/// markdown blocks go through pulldown-cmark.
///
/// # Example
///
/// ```
/// use vidmark::{Directive, Document, Element, Node, Properties, RenderHint};
/// use vidmark_markdown::render_html;
///
/// let mut directive = Directive::new("video");
/// directive.render_hint = Some(RenderHint {
///     tag_name: "figure".to_owned(),
///     properties: Properties::new(),
///     children: vec![Element::new("video").into()],
/// });
/// let doc = Document::new(vec![Node::LeafDirective(directive)]);
///
/// assert_eq!(render_html(&doc), "<figure><video></video></figure>\n");
/// ```
#[must_use]
pub fn render_html(document: &Document) -> String {
    let mut out = String::new();
    for node in &document.children {
        render_node(node, &mut out);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::LeafDirective(d) | Node::ContainerDirective(d) => render_directive(d, out),
        Node::Paragraph(p) => {
            out.push_str("<p>");
            render_nodes(&p.children, out);
            out.push_str("</p>");
        }
        Node::Text(text) => out.push_str(&escape_html(&text.value)),
        Node::Other(other) => match (&other.value, other.kind.as_str()) {
            (Some(markdown), MARKDOWN_KIND) => {
                html::push_html(out, Parser::new_ext(markdown, Options::empty()));
            }
            (Some(value), _) => out.push_str(&escape_html(value)),
            (None, _) => render_nodes(&other.children, out),
        },
    }
}

fn render_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        render_node(node, out);
    }
}

fn render_directive(directive: &Directive, out: &mut String) {
    match &directive.render_hint {
        Some(hint) => {
            render_element(&hint.tag_name, &hint.properties, out, |out| {
                render_hint_nodes(&hint.children, out);
            });
        }
        None => {
            out.push_str("<div>");
            render_nodes(&directive.children, out);
            out.push_str("</div>");
        }
    }
}

fn render_hint_nodes(nodes: &[HintNode], out: &mut String) {
    for node in nodes {
        match node {
            HintNode::Element(el) => render_element(&el.tag_name, &el.properties, out, |out| {
                render_hint_nodes(&el.children, out);
            }),
            HintNode::Text(text) => out.push_str(&escape_html(text)),
            HintNode::Raw(raw) => out.push_str(raw),
        }
    }
}

fn render_element(
    tag: &str,
    properties: &Properties,
    out: &mut String,
    children: impl FnOnce(&mut String),
) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in properties.iter() {
        if !is_attribute_name(name) {
            tracing::debug!(tag, name, "Skipping invalid attribute name");
            continue;
        }
        match value {
            PropValue::Str(s) => {
                write!(out, r#" {name}="{}""#, escape_html(s)).unwrap();
            }
            PropValue::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            PropValue::Bool(false) => {}
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }

    children(out);
    write!(out, "</{tag}>").unwrap();
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
