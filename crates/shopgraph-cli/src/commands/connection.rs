use anyhow::Result;
use shopgraph_config::ShopgraphConfig;

use crate::output::{format_connection, OutputFormat};

pub fn execute(config: &ShopgraphConfig, format: OutputFormat) -> Result<String> {
    format_connection(&config.neo4j, format)
}
