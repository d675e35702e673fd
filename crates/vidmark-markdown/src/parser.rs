//! Directive-aware block parser.
//!
//! Builds the [`Document`] tree the video transform works on. Only block
//! directives are interpreted; all other markdown is kept verbatim in
//! `markdown` blocks for the renderer.

use vidmark::{Directive, Document, Node, Other};

use crate::fence::FenceTracker;
use crate::syntax::{BlockDirective, parse_block_line};

/// Kind of [`Other`] nodes holding verbatim markdown.
pub const MARKDOWN_KIND: &str = "markdown";

/// Parse markdown into a document tree.
///
/// - `::name[label]{attrs}` on its own line becomes a leaf directive whose
///   label, if any, is a single text child.
/// - `:::name[label]{attrs}` ... `:::` becomes a container directive. A label
///   becomes a first paragraph flagged as the directive label, and the body
///   is split on blank lines into text paragraphs.
/// - Everything else is grouped into blank-line-separated markdown blocks.
///
/// Nothing inside fenced code is treated as a directive. Containers still open
/// at the end of input are closed.
///
/// # Example
///
/// ```
/// use vidmark::Node;
/// use vidmark_markdown::parse_document;
///
/// let doc = parse_document("::video{src=/videos/intro.mp4}");
/// match &doc.children[0] {
///     Node::LeafDirective(d) => assert_eq!(d.attribute("src"), Some("/videos/intro.mp4")),
///     other => panic!("unexpected node: {other:?}"),
/// }
/// ```
#[must_use]
pub fn parse_document(input: &str) -> Document {
    let mut parser = BlockParser::default();
    for line in input.lines() {
        parser.line(line);
    }
    Document::new(parser.finish())
}

/// Container directive that has been opened but not yet closed.
struct OpenContainer {
    directive: Directive,
    colon_count: usize,
}

#[derive(Default)]
struct BlockParser {
    fence: FenceTracker,
    root: Vec<Node>,
    open: Vec<OpenContainer>,
    /// Lines of the block being accumulated.
    block: Vec<String>,
    /// Whether the current block started with a code fence.
    block_is_code: bool,
}

impl BlockParser {
    fn line(&mut self, line: &str) {
        let was_in_fence = self.fence.in_fence();
        let is_fence_marker = self.fence.update(line);

        if was_in_fence || is_fence_marker {
            if !was_in_fence && self.block.is_empty() {
                self.block_is_code = true;
            }
            self.block.push(line.to_owned());
            return;
        }

        if line.trim().is_empty() {
            self.flush();
            return;
        }

        match parse_block_line(line) {
            Some(BlockDirective::Leaf {
                name,
                label,
                attributes,
            }) => {
                self.flush();
                let mut directive = Directive::new(name);
                directive.attributes = attributes;
                if !label.is_empty() {
                    directive.children.push(Node::text(label));
                }
                self.push(Node::LeafDirective(directive));
            }
            Some(BlockDirective::ContainerStart {
                name,
                label,
                attributes,
                colon_count,
            }) => {
                self.flush();
                let mut directive = Directive::new(name);
                directive.attributes = attributes;
                if !label.is_empty() {
                    directive.children.push(Node::label(vec![Node::text(label)]));
                }
                self.open.push(OpenContainer {
                    directive,
                    colon_count,
                });
            }
            Some(BlockDirective::ContainerEnd { colon_count })
                if self
                    .open
                    .last()
                    .is_some_and(|open| colon_count >= open.colon_count) =>
            {
                self.flush();
                self.close_container();
            }
            _ => self.block.push(line.to_owned()),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        while !self.open.is_empty() {
            tracing::debug!("Closing unterminated container directive at end of input");
            self.close_container();
        }
        self.root
    }

    fn close_container(&mut self) {
        if let Some(open) = self.open.pop() {
            self.push(Node::ContainerDirective(open.directive));
        }
    }

    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(open) => open.directive.children.push(node),
            None => self.root.push(node),
        }
    }

    /// Turn the accumulated lines into a node.
    fn flush(&mut self) {
        if self.block.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.block);
        let is_code = std::mem::take(&mut self.block_is_code);

        let node = if self.open.is_empty() || is_code {
            Node::Other(Other::literal(MARKDOWN_KIND, lines.join("\n")))
        } else {
            let text: Vec<&str> = lines.iter().map(|l| l.trim()).collect();
            Node::paragraph(vec![Node::text(text.join("\n"))])
        };
        self.push(node);
    }
}
