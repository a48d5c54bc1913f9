//! Configuration components for shopgraph
//!
//! One module per concern; each section has its own serde defaults so a
//! partial file only overrides what it names.

pub mod neo4j;
pub mod paging;

pub use neo4j::*;
pub use paging::*;
