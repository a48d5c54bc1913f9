use anyhow::{Context, Result};
use shopgraph_config::ShopgraphConfig;
use shopgraph_query::QueryCompiler;
use std::collections::HashMap;
use tracing::info;

use crate::cli::InspectArgs;
use crate::output::{format_query, OutputFormat};

pub fn execute(config: &ShopgraphConfig, args: InspectArgs, format: OutputFormat) -> Result<String> {
    // Later occurrences of a repeated key win
    let params: HashMap<String, String> = args.params.into_iter().collect();
    info!(label = %args.label, params = params.len(), "Compiling inspect query");

    let compiler = QueryCompiler::new(config.paging);
    let query = compiler
        .inspect(&args.label, &params)
        .with_context(|| format!("Cannot inspect '{}'", args.label))?;
    format_query(&query, format)
}
