//! End-to-end compiler wiring both modes.
//!
//! - explore: normalize → plan clauses → build projection → render
//! - inspect: normalize → plan inspection → render

use shopgraph_config::PagingConfig;
use std::collections::HashMap;
use tracing::debug;

use crate::error::QueryResult;
use crate::explore::ClausePlanner;
use crate::inspect::InspectionPlanner;
use crate::normalize::{FilterRequest, RequestNormalizer};
use crate::plan::QueryPlan;
use crate::projection::ProjectionBuilder;
use crate::render::{CypherRenderer, GeneratedQuery, QueryRenderer};
use crate::schema::SchemaGraph;

/// Graph-query compiler over the built-in schema.
///
/// Holds no mutable state; one instance can serve any number of callers
/// concurrently.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    normalizer: RequestNormalizer,
    schema: &'static SchemaGraph,
    renderer: CypherRenderer,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(PagingConfig::default())
    }
}

impl QueryCompiler {
    pub fn new(paging: PagingConfig) -> Self {
        Self {
            normalizer: RequestNormalizer::new(paging),
            schema: SchemaGraph::global(),
            renderer: CypherRenderer::new(),
        }
    }

    pub fn schema(&self) -> &'static SchemaGraph {
        self.schema
    }

    /// Build the explore plan without rendering it
    pub fn plan_explore(&self, request: &FilterRequest) -> QueryPlan {
        let normalized = self.normalizer.normalize(request);
        let clauses = ClausePlanner::new(self.schema).plan(&normalized);
        let stage = ProjectionBuilder::new().build(&clauses, &normalized);

        QueryPlan {
            clauses,
            aggregation: stage.aggregation,
            projection: stage.projection,
            order_by: normalized.order_by,
            limit: Some(u64::from(normalized.limit)),
        }
    }

    /// Build the inspect plan without rendering it
    pub fn plan_inspect(
        &self,
        label: &str,
        params: &HashMap<String, String>,
    ) -> QueryResult<QueryPlan> {
        let request = self.normalizer.normalize_inspection(label, params);
        InspectionPlanner::new(self.schema).plan(&request)
    }

    /// Multi-entity keyword search. Never fails.
    pub fn explore(&self, request: &FilterRequest) -> GeneratedQuery {
        let query = self.renderer.render(&self.plan_explore(request));
        debug!(bytes = query.cypher.len(), "Compiled explore query");
        query
    }

    /// Single entity by primary key with its one-hop neighborhood
    pub fn inspect(
        &self,
        label: &str,
        params: &HashMap<String, String>,
    ) -> QueryResult<GeneratedQuery> {
        let query = self.renderer.render(&self.plan_inspect(label, params)?);
        debug!(label, bytes = query.cypher.len(), "Compiled inspect query");
        Ok(query)
    }
}
