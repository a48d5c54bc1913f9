use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use shopgraph_cli::cli::Cli;
use shopgraph_cli::commands;
use shopgraph_config::ShopgraphConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the command output
    let level = LevelFilter::from(cli.effective_log_level());
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config =
        ShopgraphConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    let output = commands::execute(&config, cli.command, cli.format)?;
    println!("{}", output);
    Ok(())
}
