//! Inspect-mode planning: one entity by primary key plus its one-hop
//! neighborhood.
//!
//! Adjacency comes from relationship endpoints in the schema, with no
//! secondary filter gating: inspecting an `Order` pulls in every relationship
//! that touches `Order`.

use tracing::{debug, warn};

use crate::error::{QueryError, QueryResult};
use crate::normalize::InspectRequest;
use crate::plan::{
    ClausePlanBuilder, KeyLookup, Literal, MatchKind, Projection, QueryPlan, RelationshipClause,
};
use crate::schema::SchemaGraph;

#[derive(Debug, Clone, Copy)]
pub struct InspectionPlanner<'s> {
    schema: &'s SchemaGraph,
}

impl Default for InspectionPlanner<'static> {
    fn default() -> Self {
        Self::new(SchemaGraph::global())
    }
}

impl<'s> InspectionPlanner<'s> {
    pub fn new(schema: &'s SchemaGraph) -> Self {
        Self { schema }
    }

    pub fn plan(&self, request: &InspectRequest) -> QueryResult<QueryPlan> {
        let Some((label, key)) = self.schema.resolve(&request.label) else {
            warn!(label = %request.label, "Inspection of unknown label");
            return Err(QueryError::invalid_label(&request.label));
        };

        let Some(raw_value) = request.params.get(key) else {
            warn!(label = %request.label, key, "Inspection without primary key");
            return Err(QueryError::missing_key(&request.label, key));
        };

        let mut builder = ClausePlanBuilder::new().lookup(KeyLookup {
            label,
            key,
            value: Literal::infer(raw_value),
        });
        for rel in self.schema.adjacent(label) {
            builder = builder.relationship(RelationshipClause::from_def(rel, MatchKind::Optional));
        }
        let clauses = builder.build();

        debug!(
            %label,
            neighbors = clauses.relationship_aliases().len(),
            "Planned inspection"
        );

        Ok(QueryPlan {
            clauses,
            aggregation: None,
            projection: Projection::All,
            order_by: None,
            limit: request.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RequestNormalizer;
    use crate::plan::Clause;
    use crate::schema::NodeLabel;
    use std::collections::HashMap;

    fn inspect(label: &str, params: &[(&str, &str)]) -> QueryResult<QueryPlan> {
        let params: HashMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let request = RequestNormalizer::default().normalize_inspection(label, &params);
        InspectionPlanner::default().plan(&request)
    }

    fn lookup(plan: &QueryPlan) -> &KeyLookup {
        match &plan.clauses.clauses()[0] {
            Clause::Lookup(lookup) => lookup,
            other => panic!("Expected key lookup first, got {:?}", other),
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_unknown_label() {
        let err = inspect("Widget", &[("product_id", "1")]).unwrap_err();
        assert_eq!(err, QueryError::invalid_label("Widget"));
    }

    #[test]
    fn test_keyword_is_not_inspectable() {
        let err = inspect("Keyword", &[("keyword", "x")]).unwrap_err();
        assert!(matches!(err, QueryError::InvalidLabel { .. }));
    }

    #[test]
    fn test_missing_primary_key() {
        let err = inspect("Supplier", &[]).unwrap_err();
        assert_eq!(err, QueryError::missing_key("Supplier", "supplier_id"));
    }

    #[test]
    fn test_key_of_other_label_does_not_count() {
        let err = inspect("order", &[("product_id", "1")]).unwrap_err();
        assert_eq!(err, QueryError::missing_key("order", "rs_id"));
    }

    // =========================================================================
    // Plans
    // =========================================================================

    #[test]
    fn test_product_neighborhood() {
        let plan = inspect("Product", &[("product_id", "42"), ("limit", "5")]).unwrap();

        let anchor = lookup(&plan);
        assert_eq!(anchor.label, NodeLabel::Product);
        assert_eq!(anchor.key, "product_id");
        assert_eq!(anchor.value, Literal::Number("42".into()));
        assert_eq!(plan.clauses.relationship_aliases(), &["r1", "r2", "r6"]);
        assert!(plan.clauses.binds(NodeLabel::Supplier));
        assert!(plan.clauses.binds(NodeLabel::Order));
        assert!(plan.clauses.binds(NodeLabel::Storage));
        assert_eq!(plan.projection, Projection::All);
        assert_eq!(plan.limit, Some(5));
    }

    #[test]
    fn test_order_neighborhood_is_ungated() {
        let plan = inspect("ORDER", &[("rs_id", "RS-9")]).unwrap();

        assert_eq!(lookup(&plan).value, Literal::String("RS-9".into()));
        assert_eq!(plan.clauses.relationship_aliases(), &["r2", "r3", "r4", "r5"]);
        assert_eq!(plan.limit, None);
    }

    #[test]
    fn test_neighborhood_never_includes_virtual_edge() {
        for label in NodeLabel::PERSISTED {
            let key = SchemaGraph::global().primary_key(label).unwrap();
            let plan = inspect(label.name(), &[(key, "1")]).unwrap();
            assert!(!plan.clauses.relationship_aliases().contains(&"r0"));
            assert!(!plan.clauses.binds(NodeLabel::Keyword));
        }
    }
}
