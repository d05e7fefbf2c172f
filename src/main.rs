use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use metrist::analysis::Analyzer;
use metrist::config::Settings;
use metrist::model::{collected_complexity, format_summary};
use metrist::parsing::Language;
use metrist::{logging, protocol};

#[derive(Parser)]
#[command(name = "metrist")]
#[command(about = "Per-construct code complexity metrics", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Analyze source files and print their complexity
    Analyze {
        /// Files to analyze
        files: Vec<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Hide results below this collected complexity (overrides config)
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Force a content language id instead of inferring from extension
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Serve metrics requests over stdin/stdout (JSONL RPC)
    Serve,

    /// Issue a single request and print the raw response
    Request {
        /// Method name, e.g. metrics/metrics
        #[arg(long, default_value = protocol::METRICS_METHOD)]
        method: String,

        /// Request params as JSON
        #[arg(long, default_value = "{}")]
        params: String,
    },

    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("warning: failed to load configuration: {err}");
            eprintln!("using default settings");
            Settings::default()
        }
    };
    logging::init_with_config(&settings.logging);

    match cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(force)?;
            println!("Created configuration at {}", path.display());
        }
        Commands::Analyze {
            files,
            json,
            threshold,
            language,
        } => analyze_files(&settings, files, json, threshold, language)?,
        Commands::Serve => protocol::serve(&settings)?,
        Commands::Request { method, params } => {
            println!("{}", protocol::call(&settings, &method, &params)?);
        }
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

fn analyze_files(
    settings: &Settings,
    files: Vec<PathBuf>,
    json: bool,
    threshold: Option<u32>,
    language: Option<String>,
) -> anyhow::Result<()> {
    let mut config = settings.metrics.clone();
    if let Some(threshold) = threshold {
        config.hidden_under = threshold;
    }
    let forced_language = language
        .as_deref()
        .map(|id| Language::from_id(id).with_context(|| format!("unsupported language id: {id}")))
        .transpose()?;

    let analyzer = Analyzer::new(&config);
    let mut all_results = Vec::new();

    for file in &files {
        let Some(language) = forced_language.or_else(|| Language::from_path(file)) else {
            eprintln!("skipping {} (unsupported extension)", file.display());
            continue;
        };
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let uri = file.display().to_string();
        let outcome = analyzer.analyze(&uri, language, &source, &CancellationToken::new())?;

        if json {
            all_results.push(serde_json::json!({
                "uri": uri,
                "results": outcome.results,
            }));
        } else {
            println!("{}", file.display());
            if outcome.results.is_empty() {
                println!("  (no reportable constructs)");
            }
            for node in &outcome.results {
                println!(
                    "  {}:{} {} - {}",
                    node.line,
                    node.column,
                    node.text,
                    format_summary(node, &config.bands)
                );
                tracing::debug!(
                    collected = collected_complexity(node),
                    "reported {}",
                    node.description
                );
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all_results)?);
    }
    Ok(())
}
