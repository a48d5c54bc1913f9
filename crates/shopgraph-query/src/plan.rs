//! Query plan: the inspectable intermediate form between planning and rendering.
//!
//! Planners build a [`ClausePlan`] through [`ClausePlanBuilder`] and wrap it
//! in a [`QueryPlan`] together with the aggregation, projection, sort and
//! limit. Once built, a plan is never mutated; renderers only read it.

use serde::Serialize;

use crate::schema::{LabelSet, NodeLabel, RelationshipDef};

/// How a clause binds its graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    /// Must match for the row to exist
    Mandatory,
    /// May bind null
    Optional,
    /// Manufactured from request data, never matched
    Virtual,
}

/// Literal value embedded in query text.
///
/// String contents are already sanitized when the literal is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Literal {
    String(String),
    /// Numeric text, rendered verbatim
    Number(String),
}

impl Literal {
    /// Bare number if the text is a finite number, quoted string otherwise
    pub fn infer(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Literal::Number(trimmed.to_string()),
            _ => Literal::String(crate::normalize::sanitize(text)),
        }
    }
}

/// A node bound by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeClause {
    pub label: NodeLabel,
    pub kind: MatchKind,
    /// Properties attached to a virtual node
    pub properties: Vec<(&'static str, Literal)>,
}

impl NodeClause {
    pub fn alias(&self) -> &'static str {
        self.label.alias()
    }
}

/// Anchor of an inspection: one node matched by primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyLookup {
    pub label: NodeLabel,
    pub key: &'static str,
    pub value: Literal,
}

/// Case-sensitive substring test on a bound node's property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainsPredicate {
    pub label: NodeLabel,
    pub property: &'static str,
    pub needle: Literal,
}

/// A relationship traversal between two bound labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipClause {
    pub alias: &'static str,
    pub relationship: &'static str,
    pub from: NodeLabel,
    pub to: NodeLabel,
    pub kind: MatchKind,
}

impl RelationshipClause {
    /// Clause for a schema relationship; virtual edges keep their kind
    pub fn from_def(def: &RelationshipDef, kind: MatchKind) -> Self {
        Self {
            alias: def.alias,
            relationship: def.name,
            from: def.from,
            to: def.to,
            kind: if def.is_virtual { MatchKind::Virtual } else { kind },
        }
    }

    pub fn from_alias(&self) -> &'static str {
        self.from.alias()
    }

    pub fn to_alias(&self) -> &'static str {
        self.to.alias()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Clause {
    Node(NodeClause),
    Lookup(KeyLookup),
    Contains(ContainsPredicate),
    Relationship(RelationshipClause),
}

// ============================================================================
// Clause plan
// ============================================================================

/// Ordered clauses plus the bindings they introduce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClausePlan {
    clauses: Vec<Clause>,
    bound: LabelSet,
    relationship_aliases: Vec<&'static str>,
}

impl ClausePlan {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Labels bound by at least one clause
    pub fn bound_labels(&self) -> &LabelSet {
        &self.bound
    }

    pub fn binds(&self, label: NodeLabel) -> bool {
        self.bound.contains(label)
    }

    /// Relationship aliases in emission order
    pub fn relationship_aliases(&self) -> &[&'static str] {
        &self.relationship_aliases
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Accumulates clauses and records their bindings as they are pushed.
#[derive(Debug, Default)]
pub struct ClausePlanBuilder {
    plan: ClausePlan,
}

impl ClausePlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, clause: NodeClause) -> Self {
        self.plan.bound.insert(clause.label);
        self.plan.clauses.push(Clause::Node(clause));
        self
    }

    pub fn lookup(mut self, lookup: KeyLookup) -> Self {
        self.plan.bound.insert(lookup.label);
        self.plan.clauses.push(Clause::Lookup(lookup));
        self
    }

    pub fn contains(mut self, predicate: ContainsPredicate) -> Self {
        self.plan.clauses.push(Clause::Contains(predicate));
        self
    }

    pub fn relationship(mut self, clause: RelationshipClause) -> Self {
        self.plan.bound.insert(clause.from);
        self.plan.bound.insert(clause.to);
        self.plan.relationship_aliases.push(clause.alias);
        self.plan.clauses.push(Clause::Relationship(clause));
        self
    }

    pub fn build(self) -> ClausePlan {
        self.plan
    }
}

// ============================================================================
// Query plan
// ============================================================================

/// Aggregation stage carrying every existing binding forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Aggregate function, e.g. `COUNT`
    pub function: &'static str,
    /// Binding the aggregate ranges over
    pub binding: &'static str,
    /// Name the result is exposed under
    pub alias: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Projection {
    /// `RETURN *`
    All,
    /// Explicit aliases in return order
    Aliases(Vec<&'static str>),
}

impl Projection {
    pub fn aliases(&self) -> Option<&[&'static str]> {
        match self {
            Projection::All => None,
            Projection::Aliases(aliases) => Some(aliases),
        }
    }
}

/// Everything a renderer needs to produce query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    pub clauses: ClausePlan,
    pub aggregation: Option<Aggregation>,
    pub projection: Projection,
    pub order_by: Option<String>,
    pub limit: Option<u64>,
}
