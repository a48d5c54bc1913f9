//! Configuration loading
//!
//! Precedence: defaults < TOML file < environment. Command-line overrides are
//! applied by the binary on top of the loaded value.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::components::{Neo4jConfig, PagingConfig};
use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding `paging.default_page_size`
pub const ENV_DEFAULT_PAGE_SIZE: &str = "SHOPGRAPH_DEFAULT_PAGE_SIZE";
/// Environment variable overriding `paging.max_page_size`
pub const ENV_MAX_PAGE_SIZE: &str = "SHOPGRAPH_MAX_PAGE_SIZE";
/// Environment variable overriding `neo4j.url`
pub const ENV_NEO4J_URL: &str = "NEO4J_URL";
/// Environment variable overriding `neo4j.username`
pub const ENV_NEO4J_USERNAME: &str = "NEO4J_USERNAME";
/// Environment variable overriding `neo4j.password`
pub const ENV_NEO4J_PASSWORD: &str = "NEO4J_PASSWORD";

/// Top-level shopgraph configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgraphConfig {
    /// Pagination limits for explore queries
    #[serde(default)]
    pub paging: PagingConfig,
    /// Connection descriptor for the graph database
    #[serde(default)]
    pub neo4j: Neo4jConfig,
}

impl ShopgraphConfig {
    /// Load configuration with precedence: defaults < file < env
    ///
    /// A missing `path` means "defaults plus environment"; a `path` that does
    /// not exist is an error.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file; absent sections fall back to defaults
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Unparsable numeric values are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = parse_env_u32(&lookup, ENV_DEFAULT_PAGE_SIZE) {
            self.paging.default_page_size = size;
        }
        if let Some(size) = parse_env_u32(&lookup, ENV_MAX_PAGE_SIZE) {
            self.paging.max_page_size = size;
        }
        if let Some(url) = lookup(ENV_NEO4J_URL) {
            self.neo4j.url = url;
        }
        if let Some(username) = lookup(ENV_NEO4J_USERNAME) {
            self.neo4j.username = username;
        }
        if let Some(password) = lookup(ENV_NEO4J_PASSWORD) {
            self.neo4j.password = password;
        }
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.paging.validate()
    }
}

fn parse_env_u32<F>(lookup: &F, key: &str) -> Option<u32>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
