//! Cypher renderer.
//!
//! Renders a [`QueryPlan`] one line per feature, each terminated by `\n`:
//! virtual node → matches in plan order → aggregation → RETURN → ORDER BY →
//! LIMIT. Absent features emit nothing. Virtual graph elements use the APOC
//! `apoc.create.vNode` / `apoc.create.vRelationship` procedures.

use crate::plan::{
    Aggregation, Clause, ContainsPredicate, KeyLookup, Literal, MatchKind, NodeClause, Projection,
    QueryPlan, RelationshipClause,
};
use crate::render::{GeneratedQuery, QueryRenderer};

#[derive(Debug, Clone, Copy, Default)]
pub struct CypherRenderer;

impl CypherRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_clause(&self, clause: &Clause) -> String {
        match clause {
            Clause::Node(node) => self.render_node(node),
            Clause::Lookup(lookup) => self.render_lookup(lookup),
            Clause::Contains(predicate) => self.render_contains(predicate),
            Clause::Relationship(rel) => self.render_relationship(rel),
        }
    }

    fn render_node(&self, node: &NodeClause) -> String {
        match node.kind {
            MatchKind::Virtual => {
                let properties = node
                    .properties
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, render_literal(value)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "CALL apoc.create.vNode(['{}'], {{{}}}) YIELD node AS {}",
                    node.label.name(),
                    properties,
                    node.alias()
                )
            }
            MatchKind::Mandatory => {
                format!("MATCH {}", node_pattern(node.label.alias(), node.label.name()))
            }
            MatchKind::Optional => {
                format!("OPTIONAL MATCH {}", node_pattern(node.label.alias(), node.label.name()))
            }
        }
    }

    fn render_lookup(&self, lookup: &KeyLookup) -> String {
        let alias = lookup.label.alias();
        format!(
            "MATCH ({}:{})\nWHERE {}.{} = {}",
            alias,
            lookup.label.name(),
            alias,
            lookup.key,
            render_literal(&lookup.value)
        )
    }

    fn render_contains(&self, predicate: &ContainsPredicate) -> String {
        format!(
            "WHERE {}.{} CONTAINS {}",
            predicate.label.alias(),
            predicate.property,
            render_literal(&predicate.needle)
        )
    }

    fn render_relationship(&self, rel: &RelationshipClause) -> String {
        match rel.kind {
            MatchKind::Virtual => format!(
                "CALL apoc.create.vRelationship({}, '{}', {{}}, {}) YIELD rel AS {}",
                rel.from_alias(),
                rel.relationship,
                rel.to_alias(),
                rel.alias
            ),
            MatchKind::Optional => format!("OPTIONAL MATCH {}", relationship_pattern(rel)),
            MatchKind::Mandatory => format!("MATCH {}", relationship_pattern(rel)),
        }
    }

    fn render_aggregation(&self, aggregation: &Aggregation) -> String {
        format!(
            "WITH *, {}({}) as {}",
            aggregation.function, aggregation.binding, aggregation.alias
        )
    }

    fn render_projection(&self, projection: &Projection) -> String {
        match projection {
            Projection::All => "RETURN *".to_string(),
            Projection::Aliases(aliases) => format!("RETURN {}", aliases.join(", ")),
        }
    }
}

impl QueryRenderer for CypherRenderer {
    fn name(&self) -> &str {
        "cypher"
    }

    fn render(&self, plan: &QueryPlan) -> GeneratedQuery {
        let mut lines: Vec<String> = plan
            .clauses
            .clauses()
            .iter()
            .map(|clause| self.render_clause(clause))
            .collect();

        if let Some(aggregation) = &plan.aggregation {
            lines.push(self.render_aggregation(aggregation));
        }
        lines.push(self.render_projection(&plan.projection));
        if let Some(order_by) = plan.order_by.as_deref().filter(|expr| !expr.is_empty()) {
            lines.push(format!("ORDER BY {}", order_by));
        }
        if let Some(limit) = plan.limit {
            lines.push(format!("LIMIT {}", limit));
        }

        let mut cypher = String::new();
        for line in lines {
            cypher.push_str(&line);
            cypher.push('\n');
        }
        GeneratedQuery { cypher }
    }
}

fn node_pattern(alias: &str, label: &str) -> String {
    format!("({}: {})", alias, label)
}

fn relationship_pattern(rel: &RelationshipClause) -> String {
    format!(
        "{}-[{}:{}]->{}",
        node_pattern(rel.from_alias(), rel.from.name()),
        rel.alias,
        rel.relationship,
        node_pattern(rel.to_alias(), rel.to.name())
    )
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(text) => format!("'{}'", text),
        Literal::Number(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ClausePlanBuilder;
    use crate::schema::{NodeLabel, SchemaGraph};

    fn product_match() -> NodeClause {
        NodeClause {
            label: NodeLabel::Product,
            kind: MatchKind::Mandatory,
            properties: Vec::new(),
        }
    }

    fn plan_with(clauses: ClausePlanBuilder) -> QueryPlan {
        QueryPlan {
            clauses: clauses.build(),
            aggregation: None,
            projection: Projection::Aliases(vec!["product"]),
            order_by: None,
            limit: None,
        }
    }

    // =========================================================================
    // Clause rendering
    // =========================================================================

    #[test]
    fn test_render_minimal() {
        let plan = plan_with(ClausePlanBuilder::new().node(product_match()));
        let query = CypherRenderer.render(&plan);
        assert_eq!(query.as_str(), "MATCH (product: Product)\nRETURN product\n");
    }

    #[test]
    fn test_render_virtual_node() {
        let node = NodeClause {
            label: NodeLabel::Keyword,
            kind: MatchKind::Virtual,
            properties: vec![("keyword", Literal::String("lamp".into()))],
        };
        assert_eq!(
            CypherRenderer.render_node(&node),
            "CALL apoc.create.vNode(['Keyword'], {keyword: 'lamp'}) YIELD node AS keyword"
        );
    }

    #[test]
    fn test_render_virtual_relationship() {
        let is_in = SchemaGraph::global().relationship("IS_IN").unwrap();
        let clause = RelationshipClause::from_def(is_in, MatchKind::Optional);
        assert_eq!(
            CypherRenderer.render_relationship(&clause),
            "CALL apoc.create.vRelationship(keyword, 'IS_IN', {}, product) YIELD rel AS r0"
        );
    }

    #[test]
    fn test_render_optional_relationship() {
        let stores = SchemaGraph::global().relationship("STORES").unwrap();
        let clause = RelationshipClause::from_def(stores, MatchKind::Optional);
        assert_eq!(
            CypherRenderer.render_relationship(&clause),
            "OPTIONAL MATCH (storage: Storage)-[r6:STORES]->(product: Product)"
        );
    }

    #[test]
    fn test_render_contains() {
        let predicate = ContainsPredicate {
            label: NodeLabel::Product,
            property: "product_name",
            needle: Literal::String("phone".into()),
        };
        assert_eq!(
            CypherRenderer.render_contains(&predicate),
            "WHERE product.product_name CONTAINS 'phone'"
        );
    }

    #[test]
    fn test_render_lookup_number_and_string() {
        let number = KeyLookup {
            label: NodeLabel::Order,
            key: "rs_id",
            value: Literal::Number("7".into()),
        };
        let text = KeyLookup {
            label: NodeLabel::Order,
            key: "rs_id",
            value: Literal::String("RS-7".into()),
        };
        assert_eq!(
            CypherRenderer.render_lookup(&number),
            "MATCH (order:Order)\nWHERE order.rs_id = 7"
        );
        assert_eq!(
            CypherRenderer.render_lookup(&text),
            "MATCH (order:Order)\nWHERE order.rs_id = 'RS-7'"
        );
    }

    // =========================================================================
    // Trailing stages
    // =========================================================================

    #[test]
    fn test_render_trailing_stages_in_order() {
        let mut plan = plan_with(ClausePlanBuilder::new().node(product_match()));
        plan.aggregation = Some(Aggregation {
            function: "COUNT",
            binding: "order",
            alias: "order_count",
        });
        plan.order_by = Some("order_count DESC".to_string());
        plan.limit = Some(10);

        let query = CypherRenderer.render(&plan);

        assert_eq!(
            query.as_str(),
            "MATCH (product: Product)\n\
             WITH *, COUNT(order) as order_count\n\
             RETURN product\n\
             ORDER BY order_count DESC\n\
             LIMIT 10\n"
        );
    }

    #[test]
    fn test_render_star_projection() {
        let mut plan = plan_with(ClausePlanBuilder::new().node(product_match()));
        plan.projection = Projection::All;
        assert!(CypherRenderer.render(&plan).as_str().ends_with("RETURN *\n"));
    }

    #[test]
    fn test_empty_order_by_emits_nothing() {
        let mut plan = plan_with(ClausePlanBuilder::new().node(product_match()));
        plan.order_by = Some(String::new());
        assert!(!CypherRenderer.render(&plan).as_str().contains("ORDER BY"));
    }
}
