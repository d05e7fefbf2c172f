//! The metrics model: plain data records plus the free functions that
//! operate on them.
//!
//! A `MetricsNode` carries no behavior so it survives serialization across
//! the process boundary unchanged. Derived operations (complexity summation,
//! textual explanation) are free functions over the plain fields; the
//! receiving side reconstructs everything it needs from the record alone.

use serde::{Deserialize, Serialize};

use crate::config::ComplexityBands;

/// Aggregation strategy tag. `Sum` is the only strategy in use: a node's
/// collected complexity is its own weight plus the collected complexity of
/// every descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectorKind {
    #[serde(rename = "SUM")]
    Sum,
}

/// One syntactically significant construct with complexity attached.
///
/// Ownership is strictly parent to children; `children` holds the immediate
/// weighted descendants, so the tree mirrors the syntax tree's nesting for
/// every node that was assigned non-zero weight. Nodes are immutable once
/// the walk that produced them completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsNode {
    /// Byte offset of the construct's start in the source text
    pub start: usize,
    /// Byte offset one past the construct's end
    pub end: usize,
    /// Short excerpt or label for diagnostics
    pub text: String,
    /// 1-based line, derived from `start`
    pub line: usize,
    /// 1-based column, derived from `start`
    pub column: usize,
    /// Own complexity contribution, resolved once at creation
    pub complexity: u32,
    /// Human-readable label for the construct kind
    pub description: String,
    /// Whether this node is eligible as a top-level reported unit
    pub visible: bool,
    /// Aggregation strategy
    pub collector_type: CollectorKind,
    /// Immediate weighted descendants, in source order
    #[serde(default)]
    pub children: Vec<MetricsNode>,
}

impl MetricsNode {
    /// Document-level root. The only node materialized with weight zero.
    pub fn document() -> Self {
        Self {
            start: 0,
            end: 0,
            text: "root".to_string(),
            line: 1,
            column: 1,
            complexity: 0,
            description: "Document".to_string(),
            visible: false,
            collector_type: CollectorKind::Sum,
            children: Vec::new(),
        }
    }
}

/// Transitive sum of a node's own weight plus all weighted descendants.
///
/// Recomputed from the plain fields on every call; nothing is cached, so the
/// result is correct for rehydrated nodes that crossed a process boundary.
pub fn collected_complexity(node: &MetricsNode) -> u32 {
    node.complexity
        + node
            .children
            .iter()
            .map(collected_complexity)
            .sum::<u32>()
}

/// One-line summary used for hover text and diagnostics.
pub fn format_summary(node: &MetricsNode, bands: &ComplexityBands) -> String {
    let collected = collected_complexity(node);
    let band = bands.classify(collected);
    format!("Complexity is {} ({})", collected, band.label())
}

/// Multi-line breakdown of where a node's complexity comes from.
///
/// Pre-order over the subtree, one line per weighted construct.
pub fn explain(node: &MetricsNode) -> String {
    let mut out = String::new();
    push_explanation(node, &mut out);
    out
}

fn push_explanation(node: &MetricsNode, out: &mut String) {
    if node.complexity > 0 {
        out.push_str(&format!(
            "+{} for {} in line {}\n",
            node.complexity, node.description, node.line
        ));
    }
    for child in &node.children {
        push_explanation(child, out);
    }
}

/// Total node count of a subtree, the root included.
pub fn node_count(node: &MetricsNode) -> usize {
    1 + node.children.iter().map(node_count).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(weight: u32) -> MetricsNode {
        MetricsNode {
            start: 0,
            end: 0,
            text: String::new(),
            line: 1,
            column: 1,
            complexity: weight,
            description: "test".to_string(),
            visible: false,
            collector_type: CollectorKind::Sum,
            children: Vec::new(),
        }
    }

    #[test]
    fn collected_complexity_is_transitive() {
        // root(0) -> a(1) -> b(2) -> c(3)
        let mut b = leaf(2);
        b.children.push(leaf(3));
        let mut a = leaf(1);
        a.children.push(b);
        let mut root = MetricsNode::document();
        root.children.push(a);

        assert_eq!(collected_complexity(&root), 6);
        assert_eq!(collected_complexity(&root.children[0]), 6);
        assert_eq!(collected_complexity(&root.children[0].children[0]), 5);
    }

    #[test]
    fn collected_complexity_equals_weight_plus_children() {
        let mut node = leaf(4);
        node.children.push(leaf(1));
        node.children.push(leaf(2));
        let from_children: u32 = node.children.iter().map(collected_complexity).sum();
        assert_eq!(collected_complexity(&node), node.complexity + from_children);
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let node = leaf(1);
        let value = serde_json::to_value(&node).expect("serialize");
        assert_eq!(value["collectorType"], "SUM");
        assert!(value["complexity"].is_number());
        assert!(value["children"].is_array());
    }

    #[test]
    fn rehydrated_node_supports_derived_operations() {
        let mut node = leaf(2);
        node.children.push(leaf(3));
        let wire = serde_json::to_string(&node).expect("serialize");
        let back: MetricsNode = serde_json::from_str(&wire).expect("deserialize");
        assert_eq!(back, node);
        assert_eq!(collected_complexity(&back), 5);
    }
}
