//! Primary grammar adapter: TypeScript and JavaScript sources.
//!
//! Most node kinds resolve through a straight [`WeightTable`] lookup. A
//! small set of kinds needs structural inspection; those rules live here as
//! named policies so they can be tested independently of the generic walk.

use tokio_util::sync::CancellationToken;
use tree_sitter::{Node, Parser};

use crate::config::MetricsConfig;
use crate::error::{MetricsError, MetricsResult};
use crate::model::MetricsNode;
use crate::parsing::walker::{KindResolver, Resolved, TreeWalker};
use crate::parsing::weights::WeightTable;
use crate::parsing::Language;

/// Operators that gate a binary expression's contribution: short-circuit
/// logical operators plus the bitwise pair used as logical idioms.
const LOGICAL_OPERATORS: &[&str] = &["&&", "||", "??", "&", "|"];

/// Function-like kinds are always eligible as top-level reported units,
/// whatever their weight resolved to.
const FUNCTION_LIKE_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "generator_function",
    "arrow_function",
    "method_definition",
];

pub struct ScriptAdapter {
    parser: Parser,
    resolver: ScriptResolver,
}

impl ScriptAdapter {
    pub fn new(language: Language, config: &MetricsConfig) -> MetricsResult<Self> {
        let grammar: tree_sitter::Language = match language {
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::JavaScript | Language::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            other => {
                return Err(MetricsError::UnsupportedLanguage(other.id().to_string()));
            }
        };
        let mut parser = Parser::new();
        parser.set_language(&grammar)?;
        Ok(Self {
            parser,
            resolver: ScriptResolver {
                table: WeightTable::script(&config.script_weights),
            },
        })
    }

    /// Parse and walk one document version.
    ///
    /// A failed parse is logged and degrades to an empty document; the
    /// caller observes an empty result, never an error.
    pub fn metrics(&mut self, source: &str, cancel: &CancellationToken) -> MetricsNode {
        let Some(tree) = self.parser.parse(source, None) else {
            tracing::warn!("script parse produced no tree, returning empty document");
            return MetricsNode::document();
        };
        TreeWalker::new(&self.resolver, source, cancel.clone()).walk(tree.root_node())
    }
}

struct ScriptResolver {
    table: WeightTable,
}

impl KindResolver for ScriptResolver {
    fn resolve(&self, node: &Node, source: &str) -> Option<Resolved> {
        let kind = node.kind();
        let mut resolved = match kind {
            "if_statement" => conditional_weight(node, &self.table),
            "binary_expression" => logical_operator_weight(node, &self.table),
            "predefined_type" => any_keyword_weight(node, source, &self.table),
            _ => self.table.resolved(kind),
        }?;
        if always_visible(kind) {
            resolved.visible = true;
        }
        Some(resolved)
    }
}

/// A conditional with an alternate clause scores as its own, heavier kind;
/// this is two distinct weights, not a bonus added on top.
fn conditional_weight(node: &Node, table: &WeightTable) -> Option<Resolved> {
    let key = if node.child_by_field_name("alternative").is_some() {
        "if_else_statement"
    } else {
        "if_statement"
    };
    table.resolved(key)
}

/// Binary expressions only contribute when the operator short-circuits;
/// arithmetic and comparison operators contribute nothing.
fn logical_operator_weight(node: &Node, table: &WeightTable) -> Option<Resolved> {
    let operator = node.child_by_field_name("operator")?;
    if LOGICAL_OPERATORS.contains(&operator.kind()) {
        table.resolved("binary_expression")
    } else {
        None
    }
}

/// The `any` type escape hatch costs a point.
fn any_keyword_weight(node: &Node, source: &str, table: &WeightTable) -> Option<Resolved> {
    let text = source.get(node.start_byte()..node.end_byte())?;
    if text == "any" {
        table.resolved("any_keyword")
    } else {
        None
    }
}

fn always_visible(kind: &str) -> bool {
    FUNCTION_LIKE_KINDS.contains(&kind)
}
