pub mod connection;
pub mod explore;
pub mod inspect;

use anyhow::Result;
use shopgraph_config::ShopgraphConfig;

use crate::cli::Commands;
use crate::output::OutputFormat;

/// Run a subcommand and return what should be printed to stdout
pub fn execute(config: &ShopgraphConfig, command: Commands, format: OutputFormat) -> Result<String> {
    match command {
        Commands::Explore(args) => explore::execute(config, args, format),
        Commands::Inspect(args) => inspect::execute(config, args, format),
        Commands::Connection => connection::execute(config, format),
    }
}
