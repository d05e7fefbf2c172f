//! metrist: per-construct complexity metrics.
//!
//! Walks parsed syntax trees (TypeScript, JavaScript, markup-embedded
//! scripts, Lua), annotates them from a configurable weight table, and
//! produces a hierarchical metrics model that downstream tooling renders.

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parsing;
pub mod protocol;

pub use analysis::{Analyzer, Diagnostic, FileMetrics, filter_visible};
pub use config::{ComplexityBand, ComplexityBands, LanguageToggles, MetricsConfig, Settings};
pub use error::{MetricsError, MetricsResult};
pub use model::{CollectorKind, MetricsNode, collected_complexity, explain, format_summary};
pub use parsing::{Language, LuaAdapter, MarkupAdapter, ScriptAdapter, TreeWalker, WeightTable};
