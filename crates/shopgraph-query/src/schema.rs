//! Static description of the e-commerce graph schema.
//!
//! The schema is pure data: node labels, the relationships between them with
//! the presence predicate that activates each one, and the primary-key
//! property of every persisted label. Planners read it; nothing writes it
//! after construction.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::error::SchemaError;

/// Built once on first use, validated at construction.
static BUILTIN_SCHEMA: Lazy<SchemaGraph> =
    Lazy::new(|| SchemaGraph::builtin().expect("built-in schema tables are consistent"));

// ============================================================================
// Labels
// ============================================================================

/// Node label of the graph schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeLabel {
    Cancel,
    Order,
    Product,
    Return,
    Shipment,
    Storage,
    Supplier,
    /// Ephemeral search term; never matched against stored data
    Keyword,
}

impl NodeLabel {
    /// Every label, in declaration order
    pub const ALL: [NodeLabel; 8] = [
        NodeLabel::Cancel,
        NodeLabel::Order,
        NodeLabel::Product,
        NodeLabel::Return,
        NodeLabel::Shipment,
        NodeLabel::Storage,
        NodeLabel::Supplier,
        NodeLabel::Keyword,
    ];

    /// Labels backed by stored data
    pub const PERSISTED: [NodeLabel; 7] = [
        NodeLabel::Cancel,
        NodeLabel::Order,
        NodeLabel::Product,
        NodeLabel::Return,
        NodeLabel::Shipment,
        NodeLabel::Storage,
        NodeLabel::Supplier,
    ];

    /// Order in which bound node aliases appear in an explore projection
    pub const PROJECTION_ORDER: [NodeLabel; 8] = [
        NodeLabel::Product,
        NodeLabel::Order,
        NodeLabel::Supplier,
        NodeLabel::Cancel,
        NodeLabel::Return,
        NodeLabel::Shipment,
        NodeLabel::Storage,
        NodeLabel::Keyword,
    ];

    /// Label as it appears in query text, e.g. `Product`
    pub fn name(self) -> &'static str {
        match self {
            NodeLabel::Cancel => "Cancel",
            NodeLabel::Order => "Order",
            NodeLabel::Product => "Product",
            NodeLabel::Return => "Return",
            NodeLabel::Shipment => "Shipment",
            NodeLabel::Storage => "Storage",
            NodeLabel::Supplier => "Supplier",
            NodeLabel::Keyword => "Keyword",
        }
    }

    /// Variable name bound to nodes of this label, e.g. `product`
    pub fn alias(self) -> &'static str {
        match self {
            NodeLabel::Cancel => "cancel",
            NodeLabel::Order => "order",
            NodeLabel::Product => "product",
            NodeLabel::Return => "return",
            NodeLabel::Shipment => "shipment",
            NodeLabel::Storage => "storage",
            NodeLabel::Supplier => "supplier",
            NodeLabel::Keyword => "keyword",
        }
    }

    /// True for labels that only exist inside a generated query
    pub fn is_virtual(self) -> bool {
        matches!(self, NodeLabel::Keyword)
    }

    /// Resolve an external spelling, ignoring ASCII case
    pub fn parse_ignore_case(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|label| label.name().eq_ignore_ascii_case(name))
    }

    /// Position of this label in [`NodeLabel::PROJECTION_ORDER`]
    pub fn projection_rank(self) -> usize {
        Self::PROJECTION_ORDER
            .iter()
            .position(|label| *label == self)
            .unwrap_or(Self::PROJECTION_ORDER.len())
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of labels whose filters are present in a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelSet(BTreeSet<NodeLabel>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: NodeLabel) -> bool {
        self.0.insert(label)
    }

    pub fn contains(&self, label: NodeLabel) -> bool {
        self.0.contains(&label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Labels in declaration order
    pub fn iter(&self) -> impl Iterator<Item = NodeLabel> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<NodeLabel> for LabelSet {
    fn from_iter<I: IntoIterator<Item = NodeLabel>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Relationships
// ============================================================================

/// Presence predicate deciding whether a relationship joins an explore query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Activation {
    /// Active when the label's filter is present
    Present(NodeLabel),
    /// Active only when both the parent and the child filters are present
    Nested { parent: NodeLabel, child: NodeLabel },
}

impl Activation {
    pub fn is_active(&self, present: &LabelSet) -> bool {
        match *self {
            Activation::Present(label) => present.contains(label),
            Activation::Nested { parent, child } => {
                present.contains(parent) && present.contains(child)
            }
        }
    }
}

/// A typed, directed edge between two labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipDef {
    /// Relationship type, e.g. `IS_SUPPLIED_BY`
    pub name: &'static str,
    /// Variable the relationship is bound to in generated text
    pub alias: &'static str,
    pub from: NodeLabel,
    pub to: NodeLabel,
    pub activation: Activation,
    /// Manufactured per query rather than matched
    pub is_virtual: bool,
}

impl RelationshipDef {
    pub const fn persisted(
        name: &'static str,
        alias: &'static str,
        from: NodeLabel,
        to: NodeLabel,
        activation: Activation,
    ) -> Self {
        Self {
            name,
            alias,
            from,
            to,
            activation,
            is_virtual: false,
        }
    }

    pub const fn virtual_edge(
        name: &'static str,
        alias: &'static str,
        from: NodeLabel,
        to: NodeLabel,
        activation: Activation,
    ) -> Self {
        Self {
            name,
            alias,
            from,
            to,
            activation,
            is_virtual: true,
        }
    }

    /// True if `label` is either endpoint
    pub fn touches(&self, label: NodeLabel) -> bool {
        self.from == label || self.to == label
    }
}

// ============================================================================
// Schema graph
// ============================================================================

/// Relationship table and primary-key table of the domain.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    relationships: Vec<RelationshipDef>,
    primary_keys: BTreeMap<NodeLabel, &'static str>,
}

impl SchemaGraph {
    /// Build a schema, validating both tables.
    ///
    /// Every persisted label needs exactly one primary key, virtual labels
    /// none; relationship names and aliases must be unique.
    pub fn new(
        relationships: Vec<RelationshipDef>,
        primary_keys: &[(NodeLabel, &'static str)],
    ) -> Result<Self, SchemaError> {
        let mut names = HashSet::new();
        let mut aliases = HashSet::new();
        for rel in &relationships {
            if !names.insert(rel.name) {
                return Err(SchemaError::DuplicateRelationship(rel.name));
            }
            if !aliases.insert(rel.alias) {
                return Err(SchemaError::DuplicateAlias(rel.alias));
            }
        }

        let mut keys = BTreeMap::new();
        for &(label, property) in primary_keys {
            if label.is_virtual() {
                return Err(SchemaError::UnexpectedPrimaryKey(label));
            }
            if keys.insert(label, property).is_some() {
                return Err(SchemaError::DuplicatePrimaryKey(label));
            }
        }
        if let Some(missing) = NodeLabel::PERSISTED
            .into_iter()
            .find(|label| !keys.contains_key(label))
        {
            return Err(SchemaError::MissingPrimaryKey(missing));
        }

        Ok(Self {
            relationships,
            primary_keys: keys,
        })
    }

    /// The fixed e-commerce schema
    pub fn builtin() -> Result<Self, SchemaError> {
        use Activation::{Nested, Present};
        use NodeLabel::*;

        let relationships = vec![
            RelationshipDef::virtual_edge("IS_IN", "r0", Keyword, Product, Present(Keyword)),
            RelationshipDef::persisted("IS_SUPPLIED_BY", "r1", Product, Supplier, Present(Supplier)),
            RelationshipDef::persisted("CONTAINS", "r2", Order, Product, Present(Order)),
            RelationshipDef::persisted(
                "IS_CANCELED_BY",
                "r3",
                Order,
                Cancel,
                Nested { parent: Order, child: Cancel },
            ),
            RelationshipDef::persisted(
                "IS_RETURNED_BY",
                "r4",
                Order,
                Return,
                Nested { parent: Order, child: Return },
            ),
            RelationshipDef::persisted(
                "IS_SHIPPED_BY",
                "r5",
                Order,
                Shipment,
                Nested { parent: Order, child: Shipment },
            ),
            RelationshipDef::persisted("STORES", "r6", Storage, Product, Present(Storage)),
        ];

        let primary_keys = [
            (Cancel, "rg_id"),
            (Order, "rs_id"),
            (Product, "product_id"),
            (Return, "return_id"),
            (Shipment, "rm_id"),
            (Storage, "sl_id"),
            (Supplier, "supplier_id"),
        ];

        Self::new(relationships, &primary_keys)
    }

    /// Process-wide built-in schema
    pub fn global() -> &'static SchemaGraph {
        &BUILTIN_SCHEMA
    }

    /// Relationships in emission order
    pub fn relationships(&self) -> &[RelationshipDef] {
        &self.relationships
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipDef> {
        self.relationships.iter().find(|rel| rel.name == name)
    }

    pub fn primary_key(&self, label: NodeLabel) -> Option<&'static str> {
        self.primary_keys.get(&label).copied()
    }

    /// Resolve an external label spelling to a persisted label and its key
    pub fn resolve(&self, external: &str) -> Option<(NodeLabel, &'static str)> {
        let label = NodeLabel::parse_ignore_case(external)?;
        self.primary_key(label).map(|key| (label, key))
    }

    /// Persisted relationships with `label` at either endpoint
    pub fn adjacent(&self, label: NodeLabel) -> impl Iterator<Item = &RelationshipDef> + '_ {
        self.relationships
            .iter()
            .filter(move |rel| !rel.is_virtual && rel.touches(label))
    }
}
