use clap::{Parser, Subcommand, ValueEnum};
use shopgraph_config::ShopgraphConfig;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use crate::output::OutputFormat;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shopgraph")]
#[command(about = "shopgraph - compile e-commerce graph filters into Cypher")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML)
    #[arg(short = 'C', long, global = true, env = "SHOPGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Page size used when explore gets no usable limit (overrides config file)
    #[arg(long, global = true)]
    pub default_page_size: Option<u32>,

    /// Ceiling for explore limits (overrides config file)
    #[arg(long, global = true)]
    pub max_page_size: Option<u32>,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

impl Cli {
    /// Effective log level; `--log-level` wins over `--verbose`
    pub fn effective_log_level(&self) -> LogLevel {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => LogLevel::Debug,
            (None, false) => LogLevel::Warn,
        }
    }

    /// Apply command-line overrides on top of file and environment values
    pub fn apply_overrides(&self, config: &mut ShopgraphConfig) {
        if let Some(size) = self.default_page_size {
            config.paging.default_page_size = size;
        }
        if let Some(size) = self.max_page_size {
            config.paging.max_page_size = size;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Keyword search over products with optional relationship filters
    Explore(ExploreArgs),

    /// Fetch one entity by primary key with its one-hop neighborhood
    Inspect(InspectArgs),

    /// Print the graph database connection settings
    Connection,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExploreArgs {
    /// Free-text search term matched against product names
    pub keyword: Option<String>,

    /// Page size; unparsable values fall back to the default
    #[arg(long)]
    pub limit: Option<String>,

    /// Include cancellations (requires --order)
    #[arg(long)]
    pub cancel: Option<String>,

    /// Include orders containing the product
    #[arg(long)]
    pub order: Option<String>,

    /// Include returns (requires --order)
    #[arg(long = "return")]
    pub return_: Option<String>,

    /// Include shipments (requires --order)
    #[arg(long)]
    pub shipment: Option<String>,

    /// Include storage locations
    #[arg(long)]
    pub storage: Option<String>,

    /// Include suppliers
    #[arg(long)]
    pub supplier: Option<String>,

    /// Sort expression (default: order_count DESC)
    #[arg(long)]
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct InspectArgs {
    /// Node label, case-insensitive (e.g. Product, order)
    pub label: String,

    /// Query parameters, including the primary key (can be repeated)
    /// Format: KEY=VALUE
    /// Example: -p product_id=42 -p limit=5
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

/// Parse a `KEY=VALUE` pair; the value may itself contain `=`
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
