//! Graph-query compiler for the shopgraph e-commerce schema.
//!
//! Produces Cypher text in two modes:
//!
//! - **explore**: keyword search across products, composing any subset of the
//!   schema's optional relationship traversals
//! - **inspect**: one entity by primary key together with its one-hop
//!   neighborhood
//!
//! Compilation is two-phase. Planners build an immutable [`QueryPlan`] that
//! can be examined on its own; a stateless [`QueryRenderer`] turns it into
//! text. Nothing is executed.
//!
//! ```
//! use shopgraph_query::{FilterRequest, NodeLabel, QueryCompiler};
//!
//! let compiler = QueryCompiler::default();
//! let query = compiler.explore(&FilterRequest::new().with_filter(NodeLabel::Storage, "s1"));
//! assert!(query.as_str().contains("[r6:STORES]"));
//! ```

pub mod compiler;
pub mod error;
pub mod explore;
pub mod inspect;
pub mod normalize;
pub mod plan;
pub mod projection;
pub mod render;
pub mod schema;

pub use compiler::QueryCompiler;
pub use error::{QueryError, QueryResult, SchemaError};
pub use explore::ClausePlanner;
pub use inspect::InspectionPlanner;
pub use normalize::{
    sanitize, FilterRequest, InspectRequest, NormalizedRequest, RequestNormalizer,
    DEFAULT_ORDER_BY,
};
pub use plan::{ClausePlan, QueryPlan};
pub use projection::ProjectionBuilder;
pub use render::{CypherRenderer, GeneratedQuery, QueryRenderer};
pub use schema::{NodeLabel, SchemaGraph};
