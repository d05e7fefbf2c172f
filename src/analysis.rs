//! File-level analysis: upstream gate, adapter dispatch, result filtering,
//! and the diagnostics side channel.
//!
//! One call analyzes one document version. The configuration is read-only
//! for the duration of the call and nothing is shared between invocations,
//! so concurrent requests for the same URI simply run two independent walks.

use glob::Pattern;
use tokio_util::sync::CancellationToken;

use crate::config::MetricsConfig;
use crate::error::MetricsResult;
use crate::model::{MetricsNode, collected_complexity, format_summary};
use crate::parsing::{Language, LuaAdapter, MarkupAdapter, ScriptAdapter};

/// A `(range, message)` pair mirroring one visible result node.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// The outcome of analyzing one document: filtered root-level nodes plus the
/// optional diagnostics side channel (empty unless enabled in config).
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct FileMetrics {
    pub results: Vec<MetricsNode>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Analyzer<'a> {
    config: &'a MetricsConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a MetricsConfig) -> Self {
        Self { config }
    }

    /// Analyze one document version.
    ///
    /// The gate runs first: excluded paths, oversized files, and disabled
    /// languages short-circuit to an empty result before any parse attempt.
    /// That is a policy decision, not a failure.
    pub fn analyze(
        &self,
        uri: &str,
        language: Language,
        source: &str,
        cancel: &CancellationToken,
    ) -> MetricsResult<FileMetrics> {
        if self.is_excluded(uri) || self.is_above_size_limit(source) || self.is_disabled(language)
        {
            tracing::debug!(uri, language = language.id(), "gated before parse");
            return Ok(FileMetrics::default());
        }

        let root = match language {
            Language::Lua => LuaAdapter::new(self.config)?.metrics(source, cancel),
            lang if lang.is_markup() => MarkupAdapter::new(self.config)?.metrics(source, cancel),
            lang => ScriptAdapter::new(lang, self.config)?.metrics(source, cancel),
        };

        let results = filter_visible(&root, self.config.hidden_under);
        let diagnostics = if self.config.diagnostics_enabled {
            results
                .iter()
                .map(|node| Diagnostic {
                    start: node.start,
                    end: node.end,
                    line: node.line,
                    column: node.column,
                    message: format_summary(node, &self.config.bands),
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(FileMetrics {
            results,
            diagnostics,
        })
    }

    fn is_disabled(&self, language: Language) -> bool {
        let enabled = &self.config.enabled;
        !match language {
            Language::TypeScript => enabled.typescript,
            Language::Tsx => enabled.tsx,
            Language::JavaScript => enabled.javascript,
            Language::Jsx => enabled.jsx,
            Language::Vue => enabled.vue,
            Language::Html => enabled.html,
            Language::Lua => enabled.lua,
        }
    }

    fn is_above_size_limit(&self, source: &str) -> bool {
        if self.config.file_size_limit_mb < 0.0 {
            return false;
        }
        let limit = (self.config.file_size_limit_mb * 1024.0 * 1024.0) as usize;
        source.len() > limit
    }

    fn is_excluded(&self, uri: &str) -> bool {
        self.config
            .exclude
            .iter()
            .filter_map(|raw| Pattern::new(raw).ok())
            .any(|pattern| pattern.matches(uri))
    }
}

/// Collect every node that is visible and clears the threshold, in source
/// order and independent of nesting depth: a low-complexity outer function
/// and a high-complexity inner method can both appear.
pub fn filter_visible(root: &MetricsNode, threshold: u32) -> Vec<MetricsNode> {
    let mut out = Vec::new();
    collect(root, threshold, &mut out);
    out
}

fn collect(node: &MetricsNode, threshold: u32, out: &mut Vec<MetricsNode>) {
    if node.visible && collected_complexity(node) >= threshold {
        out.push(node.clone());
    }
    for child in &node.children {
        collect(child, threshold, out);
    }
}
