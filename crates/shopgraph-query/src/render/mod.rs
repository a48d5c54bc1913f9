//! Target renderers for query plans.
//!
//! Renderers are stateless: the same plan always yields the same text.

mod cypher;

pub use cypher::CypherRenderer;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::plan::QueryPlan;

/// Generated query text, shaped like the response body callers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuery {
    pub cypher: String,
}

impl GeneratedQuery {
    pub fn as_str(&self) -> &str {
        &self.cypher
    }

    pub fn into_string(self) -> String {
        self.cypher
    }
}

impl fmt::Display for GeneratedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cypher)
    }
}

/// Trait for rendering a plan to a target query language.
pub trait QueryRenderer: Send + Sync {
    /// Unique name for this renderer
    fn name(&self) -> &str;

    /// Render the plan to query text
    fn render(&self, plan: &QueryPlan) -> GeneratedQuery;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ClausePlan, Projection};

    struct MockRenderer;

    impl QueryRenderer for MockRenderer {
        fn name(&self) -> &str {
            "mock"
        }

        fn render(&self, _plan: &QueryPlan) -> GeneratedQuery {
            GeneratedQuery {
                cypher: "RETURN 1".to_string(),
            }
        }
    }

    #[test]
    fn test_mock_renderer() {
        let renderer: Box<dyn QueryRenderer> = Box::new(MockRenderer);
        let plan = QueryPlan {
            clauses: ClausePlan::default(),
            aggregation: None,
            projection: Projection::All,
            order_by: None,
            limit: None,
        };

        let query = renderer.render(&plan);

        assert_eq!(renderer.name(), "mock");
        assert_eq!(query.to_string(), "RETURN 1");
    }

    #[test]
    fn test_generated_query_json_shape() {
        let query = GeneratedQuery {
            cypher: "MATCH (product: Product)\n".to_string(),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({ "cypher": "MATCH (product: Product)\n" }));
    }
}
