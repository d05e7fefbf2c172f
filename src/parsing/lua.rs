//! Secondary grammar adapter: Lua sources.
//!
//! Purely table-driven; the Lua grammar has no structural exceptions. The
//! statement table assigns weight to control flow and member access, but only
//! function-declaration-equivalent nodes are ever visible.

use tokio_util::sync::CancellationToken;
use tree_sitter::{Node, Parser};

use crate::config::MetricsConfig;
use crate::error::MetricsResult;
use crate::model::MetricsNode;
use crate::parsing::walker::{KindResolver, Resolved, TreeWalker};
use crate::parsing::weights::WeightTable;

pub struct LuaAdapter {
    parser: Parser,
    resolver: LuaResolver,
}

impl LuaAdapter {
    pub fn new(config: &MetricsConfig) -> MetricsResult<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_lua::LANGUAGE.into())?;
        Ok(Self {
            parser,
            resolver: LuaResolver {
                table: WeightTable::lua(&config.lua_weights),
            },
        })
    }

    /// Parse failure is logged and yields an empty root, never an error.
    pub fn metrics(&mut self, source: &str, cancel: &CancellationToken) -> MetricsNode {
        let Some(tree) = self.parser.parse(source, None) else {
            tracing::warn!("lua parse produced no tree, returning empty document");
            return MetricsNode::document();
        };
        TreeWalker::new(&self.resolver, source, cancel.clone()).walk(tree.root_node())
    }
}

struct LuaResolver {
    table: WeightTable,
}

impl KindResolver for LuaResolver {
    fn resolve(&self, node: &Node, _source: &str) -> Option<Resolved> {
        self.table.resolved(node.kind())
    }
}
