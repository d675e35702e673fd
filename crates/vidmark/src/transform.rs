//! Tree walk that rewrites every eligible video directive.

use crate::classify::{DirectiveShape, classify};
use crate::config::VideoConfig;
use crate::error::VideoError;
use crate::extract::extract;
use crate::probe::{FsProbe, PathProbe, probe_sources};
use crate::rewrite::build_render_hint;
use crate::source::locate_sources;
use crate::tree::{Directive, Document, Node};

/// Shapes in pass order.
const PASSES: [DirectiveShape; 2] = [DirectiveShape::Leaf, DirectiveShape::Container];

/// Outcome of a transform run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Directives that received a render hint.
    pub rewritten: usize,
    /// Video directives left untouched because they were not eligible.
    pub skipped: usize,
}

/// Rewrites `video` directives into multi-source video elements.
///
/// The tree is walked twice, once for leaf directives and once for container
/// directives. Each eligible node is processed independently: its variants
/// are probed, then its render hint is written in one step. Directives that
/// already carry a render hint are left alone, so applying the transform
/// twice is a no-op.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use vidmark::{Directive, Document, Node, VideoConfig, VideoTransform};
///
/// let mut doc = Document::new(vec![Node::LeafDirective(
///     Directive::new("video").with_attribute("src", "/videos/sample.mp4"),
/// )]);
///
/// let config = VideoConfig::new().with_base_url("https://cdn.example.com");
/// let only_mp4 = |path: &Path| -> std::io::Result<bool> {
///     Ok(path.extension().is_some_and(|ext| ext == "mp4"))
/// };
/// let transform = VideoTransform::with_probe(config, only_mp4);
/// let report = transform.apply(&mut doc).unwrap();
///
/// assert_eq!(report.rewritten, 1);
/// ```
#[derive(Debug)]
pub struct VideoTransform<P = FsProbe> {
    config: VideoConfig,
    probe: P,
}

impl VideoTransform<FsProbe> {
    /// Create a transform that probes the local filesystem.
    #[must_use]
    pub fn new(config: VideoConfig) -> Self {
        Self::with_probe(config, FsProbe)
    }
}

impl<P> VideoTransform<P> {
    /// Create a transform with a custom existence probe.
    #[must_use]
    pub fn with_probe(config: VideoConfig, probe: P) -> Self {
        Self { config, probe }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Probe in use.
    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }
}

impl<P: PathProbe> VideoTransform<P> {
    /// Rewrite all eligible video directives in `document`.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::Probe`] if an existence check fails. Nodes
    /// rewritten before the failure keep their render hints; the failing node
    /// is left untouched.
    pub fn apply(&self, document: &mut Document) -> Result<TransformReport, VideoError> {
        let mut report = TransformReport::default();

        for shape in PASSES {
            for path in find_pending(&document.children, shape) {
                let Some(directive) = directive_at_mut(&mut document.children, &path) else {
                    continue;
                };
                let request = match extract(directive, shape) {
                    Ok(request) => request,
                    Err(reason) => {
                        tracing::debug!(?shape, ?reason, "Skipping video directive");
                        report.skipped += 1;
                        continue;
                    }
                };

                let set = locate_sources(request.reference, &self.config);
                let sources = probe_sources(&set, &self.probe)?;
                tracing::debug!(
                    ?shape,
                    reference = request.reference,
                    sources = sources.len(),
                    "Rewriting video directive"
                );
                let hint = build_render_hint(&request, &sources, &self.config);
                directive.render_hint = Some(hint);
                report.rewritten += 1;
            }
        }

        tracing::info!(
            rewritten = report.rewritten,
            skipped = report.skipped,
            "Video transform completed"
        );
        Ok(report)
    }
}

#[cfg(feature = "async")]
impl<P: crate::probe::AsyncPathProbe> VideoTransform<P> {
    /// Asynchronous counterpart of [`apply`](VideoTransform::apply).
    ///
    /// Nodes are still processed one at a time; a node's render hint is only
    /// written once all of its probes have completed.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::Probe`] if an existence check fails.
    pub async fn apply_async(
        &self,
        document: &mut Document,
    ) -> Result<TransformReport, VideoError> {
        let mut report = TransformReport::default();

        for shape in PASSES {
            for path in find_pending(&document.children, shape) {
                let Some(directive) = directive_at_mut(&mut document.children, &path) else {
                    continue;
                };
                let request = match extract(directive, shape) {
                    Ok(request) => request,
                    Err(reason) => {
                        tracing::debug!(?shape, ?reason, "Skipping video directive");
                        report.skipped += 1;
                        continue;
                    }
                };

                let set = locate_sources(request.reference, &self.config);
                let sources = crate::probe::probe_sources_async(&set, &self.probe).await?;
                tracing::debug!(
                    ?shape,
                    reference = request.reference,
                    sources = sources.len(),
                    "Rewriting video directive"
                );
                let hint = build_render_hint(&request, &sources, &self.config);
                directive.render_hint = Some(hint);
                report.rewritten += 1;
            }
        }

        tracing::info!(
            rewritten = report.rewritten,
            skipped = report.skipped,
            "Video transform completed"
        );
        Ok(report)
    }
}

/// Child-index paths of pending directives of `shape`, in document order.
fn find_pending(nodes: &[Node], shape: DirectiveShape) -> Vec<Vec<usize>> {
    fn visit(
        nodes: &[Node],
        shape: DirectiveShape,
        prefix: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        for (idx, node) in nodes.iter().enumerate() {
            prefix.push(idx);
            if classify(node) == Some(shape) {
                out.push(prefix.clone());
            }
            visit(node.children(), shape, prefix, out);
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    visit(nodes, shape, &mut Vec::new(), &mut out);
    out
}

/// Follow a child-index path to a directive.
fn directive_at_mut<'a>(nodes: &'a mut [Node], path: &[usize]) -> Option<&'a mut Directive> {
    let (last, parents) = path.split_last()?;
    let mut current = nodes;
    for &idx in parents {
        current = current.get_mut(idx)?.children_mut();
    }
    match current.get_mut(*last)? {
        Node::LeafDirective(d) | Node::ContainerDirective(d) => Some(d),
        _ => None,
    }
}
