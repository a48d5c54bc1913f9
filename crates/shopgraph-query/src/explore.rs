//! Explore-mode clause planning.
//!
//! Emission order is fixed by the schema's relationship table, never by the
//! order filters arrive in, so identical filter sets always yield identical
//! plans:
//!
//! 1. virtual `Keyword` node (keyword present)
//! 2. mandatory `Product` match
//! 3. `product_name CONTAINS` predicate (keyword present)
//! 4. every relationship whose activation holds, in table order

use tracing::debug;

use crate::normalize::NormalizedRequest;
use crate::plan::{
    ClausePlan, ClausePlanBuilder, ContainsPredicate, Literal, MatchKind, NodeClause,
    RelationshipClause,
};
use crate::schema::{NodeLabel, SchemaGraph};

/// Root label of every explore query
pub const ROOT_LABEL: NodeLabel = NodeLabel::Product;

/// Product property searched by the keyword
pub const SEARCH_PROPERTY: &str = "product_name";

/// Property carried by the virtual keyword node
pub const KEYWORD_PROPERTY: &str = "keyword";

/// Derives the explore clause plan from a normalized request.
#[derive(Debug, Clone, Copy)]
pub struct ClausePlanner<'s> {
    schema: &'s SchemaGraph,
}

impl Default for ClausePlanner<'static> {
    fn default() -> Self {
        Self::new(SchemaGraph::global())
    }
}

impl<'s> ClausePlanner<'s> {
    pub fn new(schema: &'s SchemaGraph) -> Self {
        Self { schema }
    }

    pub fn plan(&self, request: &NormalizedRequest) -> ClausePlan {
        let mut builder = ClausePlanBuilder::new();

        if let Some(keyword) = &request.keyword {
            builder = builder.node(NodeClause {
                label: NodeLabel::Keyword,
                kind: MatchKind::Virtual,
                properties: vec![(KEYWORD_PROPERTY, Literal::String(keyword.clone()))],
            });
        }

        builder = builder.node(NodeClause {
            label: ROOT_LABEL,
            kind: MatchKind::Mandatory,
            properties: Vec::new(),
        });

        if let Some(keyword) = &request.keyword {
            builder = builder.contains(ContainsPredicate {
                label: ROOT_LABEL,
                property: SEARCH_PROPERTY,
                needle: Literal::String(keyword.clone()),
            });
        }

        for rel in self.schema.relationships() {
            if rel.activation.is_active(&request.present) {
                debug!(relationship = rel.name, alias = rel.alias, "Activating clause");
                builder = builder.relationship(RelationshipClause::from_def(rel, MatchKind::Optional));
            }
        }

        builder.build()
    }
}
