//! Explore-mode projection and aggregate injection.

use serde::Serialize;
use tracing::debug;

use crate::normalize::{NormalizedRequest, ORDER_COUNT};
use crate::plan::{Aggregation, ClausePlan, Projection};
use crate::schema::NodeLabel;

/// Output of [`ProjectionBuilder::build`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionStage {
    pub aggregation: Option<Aggregation>,
    pub projection: Projection,
}

/// Derives the RETURN list from the bindings a clause plan introduced.
///
/// Node aliases come first in [`NodeLabel::PROJECTION_ORDER`], then every
/// emitted relationship alias sorted lexicographically. Emission order and
/// return order are independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, plan: &ClausePlan, request: &NormalizedRequest) -> ProjectionStage {
        let mut nodes: Vec<NodeLabel> = plan.bound_labels().iter().collect();
        nodes.sort_by_key(|label| label.projection_rank());

        let mut relationships = plan.relationship_aliases().to_vec();
        relationships.sort_unstable();

        let aliases = nodes
            .into_iter()
            .map(NodeLabel::alias)
            .chain(relationships)
            .collect();

        ProjectionStage {
            aggregation: Self::aggregation(plan, request),
            projection: Projection::Aliases(aliases),
        }
    }

    /// The order count is only computable once both the keyword and the
    /// order clauses are in the plan.
    fn aggregation(plan: &ClausePlan, request: &NormalizedRequest) -> Option<Aggregation> {
        if !request.sorts_by_order_count() {
            return None;
        }
        if !(plan.binds(NodeLabel::Keyword) && plan.binds(NodeLabel::Order)) {
            debug!("Sort refers to {} but keyword or order is unbound", ORDER_COUNT);
            return None;
        }
        Some(Aggregation {
            function: "COUNT",
            binding: NodeLabel::Order.alias(),
            alias: ORDER_COUNT,
        })
    }
}
