// Shared formatting for command output

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use shopgraph_config::Neo4jConfig;
use shopgraph_query::GeneratedQuery;

/// Output format supported by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON object for programmatic consumption
    #[default]
    Json,
    /// Raw text
    Text,
}

/// Serialize a value as pretty JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render a generated query; text output is the Cypher exactly as produced
pub fn format_query(query: &GeneratedQuery, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(query),
        OutputFormat::Text => Ok(query.as_str().trim_end_matches('\n').to_string()),
    }
}

pub fn format_connection(neo4j: &Neo4jConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(neo4j),
        OutputFormat::Text => Ok(format!(
            "url: {}\nusername: {}\npassword: {}",
            neo4j.url,
            neo4j.username,
            if neo4j.password.is_empty() { "" } else { "********" }
        )),
    }
}
