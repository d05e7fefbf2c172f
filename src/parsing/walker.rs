//! Generic depth-first traversal of a parsed syntax tree.
//!
//! The walker is grammar-agnostic: a [`KindResolver`] turns each syntax node
//! into an optional `(weight, description, visible)` contribution, and the
//! walker materializes a [`MetricsNode`] for every non-zero contribution.
//! Zero-weight structural nodes are elided entirely, so each materialized
//! node's `children` list holds its nearest weighted descendants and the
//! weight of every construct reaches every enclosing ancestor through the
//! recursive `collected_complexity` sum.
//!
//! Cancellation is cooperative: the token is checked before each child visit
//! and a cancelled walk returns the partial tree built so far.

use tokio_util::sync::CancellationToken;
use tree_sitter::Node;

use crate::model::{CollectorKind, MetricsNode};

/// Guard against pathological nesting blowing the stack.
const MAX_WALK_DEPTH: usize = 256;

/// Maximum excerpt length stored on a node, in characters.
const EXCERPT_CHARS: usize = 40;

/// One resolved contribution for a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub weight: u32,
    pub description: &'static str,
    pub visible: bool,
}

/// Resolves a syntax node into its complexity contribution.
///
/// Most kinds are a straight table lookup; grammars with structural
/// exceptions (conditional-with-else, logical-operator gating) implement
/// them here as named rules.
pub trait KindResolver {
    /// `None` means "no contribution": the node is skipped and its children
    /// attach to the nearest weighted ancestor.
    fn resolve(&self, node: &Node, source: &str) -> Option<Resolved>;
}

pub struct TreeWalker<'a, R: KindResolver> {
    resolver: &'a R,
    source: &'a str,
    cancel: CancellationToken,
}

impl<'a, R: KindResolver> TreeWalker<'a, R> {
    pub fn new(resolver: &'a R, source: &'a str, cancel: CancellationToken) -> Self {
        Self {
            resolver,
            source,
            cancel,
        }
    }

    /// Walk the tree rooted at `root` and return the document-level node.
    ///
    /// The result is partial if the token was cancelled mid-walk; partial
    /// trees are well-formed, just truncated at the cancellation point.
    pub fn walk(&self, root: Node) -> MetricsNode {
        let mut document = MetricsNode::document();
        document.end = root.end_byte();
        self.visit(root, &mut document.children, 0);
        document
    }

    fn visit(&self, node: Node, siblings: &mut Vec<MetricsNode>, depth: usize) {
        if depth > MAX_WALK_DEPTH {
            tracing::warn!(
                kind = node.kind(),
                byte = node.start_byte(),
                "max walk depth exceeded, truncating traversal"
            );
            return;
        }

        let contribution = self
            .resolver
            .resolve(&node, self.source)
            .filter(|r| r.weight > 0);

        match contribution {
            Some(resolved) => {
                let mut made = self.materialize(&node, resolved);
                self.visit_children(node, &mut made.children, depth);
                siblings.push(made);
            }
            // No contribution: children attach to the nearest weighted ancestor.
            None => self.visit_children(node, siblings, depth),
        }
    }

    fn visit_children(&self, node: Node, target: &mut Vec<MetricsNode>, depth: usize) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        drop(cursor);
        for child in children {
            if self.cancel.is_cancelled() {
                return;
            }
            self.visit(child, target, depth + 1);
        }
    }

    fn materialize(&self, node: &Node, resolved: Resolved) -> MetricsNode {
        let start = node.start_byte();
        let end = node.end_byte();
        let position = node.start_position();
        MetricsNode {
            start,
            end,
            text: excerpt(self.source.get(start..end).unwrap_or_default()),
            line: position.row + 1,
            column: position.column + 1,
            complexity: resolved.weight,
            description: resolved.description.to_string(),
            visible: resolved.visible,
            collector_type: CollectorKind::Sum,
            children: Vec::new(),
        }
    }
}

/// First line of the construct, trimmed and clipped to a short label.
fn excerpt(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() <= EXCERPT_CHARS {
        return first_line.to_string();
    }
    let clipped: String = first_line.chars().take(EXCERPT_CHARS).collect();
    format!("{clipped}...")
}
