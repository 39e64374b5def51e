//! reposcope - Entry Point

use clap::Parser;
use reposcope::model::{FilterSet, SortKey, SortOrder};
use std::path::PathBuf;
use tracing::info;

/// reposcope - TUI for browsing repository search results
#[derive(Parser, Debug)]
#[command(name = "reposcope")]
#[command(version)]
#[command(about = "TUI for searching and browsing remote repositories")]
pub struct Args {
    /// Initial search query (multiple words are joined with spaces)
    pub query: Vec<String>,

    /// Restrict results to a language (e.g. rust)
    #[arg(short = 'L', long)]
    pub language: Option<String>,

    /// Sort field
    #[arg(long, default_value = "stars", value_parser = ["stars", "forks", "updated"])]
    pub sort: String,

    /// Sort direction
    #[arg(long, default_value = "desc", value_parser = ["desc", "asc"])]
    pub order: String,

    /// Only show repositories with at least this many stars
    #[arg(long)]
    pub min_stars: Option<u32>,

    /// Restrict results to a license (e.g. mit)
    #[arg(long)]
    pub license: Option<String>,

    /// API base URL (e.g. a GitHub Enterprise host)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Path to log file for tracing output
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Build the initial committed filters from CLI arguments.
    ///
    /// The `sort` and `order` strings were validated by clap's value
    /// parsers, so unknown values fall back to the defaults rather than
    /// erroring twice.
    fn initial_filters(&self) -> FilterSet {
        let sort_key = match self.sort.as_str() {
            "forks" => SortKey::Forks,
            "updated" => SortKey::Updated,
            _ => SortKey::Stars,
        };
        let order = match self.order.as_str() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        };
        FilterSet {
            text: self.query.join(" "),
            language: self.language.clone(),
            sort_key,
            order,
            min_stars: self.min_stars,
            license: self.license.clone(),
            ..FilterSet::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = reposcope::config::load_config_with_precedence(args.config.clone())?;
        let merged = reposcope::config::merge_config(config_file);
        let with_env = reposcope::config::apply_env_overrides(merged);
        reposcope::config::apply_cli_overrides(
            with_env,
            args.log_file.clone(),
            args.api_base.clone(),
        )
    };

    reposcope::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let initial = args.initial_filters();

    // Single-threaded runtime: every orchestrator update happens on the
    // event-loop thread, fetch tasks run interleaved on the same thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(reposcope::view::run(config, initial))?;

    Ok(())
}
