//! Graph database connection descriptor
//!
//! The compiler never connects to the database; this section only tells
//! consumers of the generated text where to run it.

use serde::{Deserialize, Serialize};

/// Neo4j connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// Bolt or neo4j scheme URL
    pub url: String,
    /// Database user
    pub username: String,
    /// Database password (empty when unset)
    pub password: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            url: "neo4j://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let neo4j = Neo4jConfig::default();
        assert_eq!(neo4j.url, "neo4j://localhost:7687");
        assert_eq!(neo4j.username, "neo4j");
        assert!(neo4j.password.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let neo4j: Neo4jConfig = toml::from_str(r#"username = "shop""#).unwrap();
        assert_eq!(neo4j.username, "shop");
        assert_eq!(neo4j.url, "neo4j://localhost:7687");
    }
}
