//! Layered configuration for the metrics engine.
//!
//! Three layers, later ones win:
//! - Built-in defaults
//! - TOML configuration file (`.metrist/settings.toml`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables are prefixed with `METRIST_` and use double
//! underscores to separate nested levels:
//! - `METRIST_METRICS__HIDDEN_UNDER=3` sets `metrics.hidden_under`
//! - `METRIST_METRICS__DIAGNOSTICS_ENABLED=true` sets `metrics.diagnostics_enabled`
//! - `METRIST_LOGGING__DEFAULT=debug` sets `logging.default`
//!
//! The `metrics` section is the same configuration surface the protocol
//! accepts per request; a request-supplied configuration replaces the
//! ambient one wholesale for that request.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".metrist";
const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Metrics configuration (weights, thresholds, language toggles)
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The full weight/threshold configuration surface.
///
/// This is what crosses the protocol boundary in `RequestData.configuration`:
/// a flat map of toggles, thresholds, and per-kind weight overrides, with the
/// secondary-grammar statement weights nested under `lua_weights`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Per-language enablement, checked before parsing
    #[serde(default)]
    pub enabled: LanguageToggles,

    /// Reject files larger than this before parsing. Negative disables the check.
    #[serde(default = "default_file_size_limit_mb")]
    pub file_size_limit_mb: f64,

    /// Glob patterns matched against the document URI; matches are skipped
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Visible nodes below this collected complexity are dropped from results
    #[serde(default)]
    pub hidden_under: u32,

    /// Emit (range, message) diagnostic pairs beside the result set
    #[serde(default = "default_false")]
    pub diagnostics_enabled: bool,

    /// Complexity band boundaries, consumed by presentation
    #[serde(default)]
    pub bands: ComplexityBands,

    /// Weight overrides for the script grammar, keyed by node kind or rule id
    #[serde(default)]
    pub script_weights: HashMap<String, u32>,

    /// Weight overrides for the Lua grammar, keyed by statement kind
    #[serde(default)]
    pub lua_weights: HashMap<String, u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LanguageToggles {
    #[serde(default = "default_true")]
    pub typescript: bool,
    #[serde(default = "default_true")]
    pub tsx: bool,
    #[serde(default = "default_true")]
    pub javascript: bool,
    #[serde(default = "default_true")]
    pub jsx: bool,
    #[serde(default = "default_true")]
    pub vue: bool,
    #[serde(default = "default_true")]
    pub html: bool,
    #[serde(default = "default_true")]
    pub lua: bool,
}

/// Band boundaries for presentation.
///
/// Half-open upward intervals: `collected < normal` is Low, `< high` is
/// Normal, `< extreme` is High, everything else is Extreme.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ComplexityBands {
    #[serde(default = "default_band_normal")]
    pub normal: u32,
    #[serde(default = "default_band_high")]
    pub high: u32,
    #[serde(default = "default_band_extreme")]
    pub extreme: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityBand {
    Low,
    Normal,
    High,
    Extreme,
}

impl ComplexityBands {
    pub fn classify(&self, collected: u32) -> ComplexityBand {
        if collected < self.normal {
            ComplexityBand::Low
        } else if collected < self.high {
            ComplexityBand::Normal
        } else if collected < self.extreme {
            ComplexityBand::High
        } else {
            ComplexityBand::Extreme
        }
    }
}

impl ComplexityBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module log level overrides
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_file_size_limit_mb() -> f64 {
    0.5
}
fn default_band_normal() -> u32 {
    5
}
fn default_band_high() -> u32 {
    10
}
fn default_band_extreme() -> u32 {
    25
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            metrics: MetricsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: LanguageToggles::default(),
            file_size_limit_mb: default_file_size_limit_mb(),
            exclude: Vec::new(),
            hidden_under: 0,
            diagnostics_enabled: false,
            bands: ComplexityBands::default(),
            script_weights: HashMap::new(),
            lua_weights: HashMap::new(),
        }
    }
}

impl Default for LanguageToggles {
    fn default() -> Self {
        Self {
            typescript: true,
            tsx: true,
            javascript: true,
            jsx: true,
            vue: true,
            html: true,
            lua: true,
        }
    }
}

impl Default for ComplexityBands {
    fn default() -> Self {
        Self {
            normal: default_band_normal(),
            high: default_band_high(),
            extreme: default_band_extreme(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("METRIST_").split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load configuration from a specific file plus environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("METRIST_").split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Write the default configuration to `.metrist/settings.toml`.
    ///
    /// Returns the path written. Refuses to overwrite unless `force` is set.
    pub fn init_config_file(force: bool) -> std::io::Result<PathBuf> {
        let dir = PathBuf::from(CONFIG_DIR);
        let path = dir.join(CONFIG_FILE);
        if path.exists() && !force {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to overwrite)", path.display()),
            ));
        }
        std::fs::create_dir_all(&dir)?;
        let rendered = toml::to_string_pretty(&Settings::default())
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        std::fs::write(&path, rendered)?;
        Ok(path)
    }

    /// Walk up from the current directory looking for `.metrist/settings.toml`
    fn find_config() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_classify_half_open() {
        let bands = ComplexityBands::default();
        assert_eq!(bands.classify(0), ComplexityBand::Low);
        assert_eq!(bands.classify(4), ComplexityBand::Low);
        assert_eq!(bands.classify(5), ComplexityBand::Normal);
        assert_eq!(bands.classify(9), ComplexityBand::Normal);
        assert_eq!(bands.classify(10), ComplexityBand::High);
        assert_eq!(bands.classify(24), ComplexityBand::High);
        assert_eq!(bands.classify(25), ComplexityBand::Extreme);
    }

    #[test]
    fn metrics_config_deserializes_from_partial_json() {
        let config: MetricsConfig = serde_json::from_str(
            r#"{"hidden_under": 3, "script_weights": {"if_statement": 4}}"#,
        )
        .expect("valid config");
        assert_eq!(config.hidden_under, 3);
        assert_eq!(config.script_weights.get("if_statement"), Some(&4));
        assert!(config.enabled.lua);
    }
}
