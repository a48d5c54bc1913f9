//! # Shopgraph Configuration Library
//!
//! Configuration for the shopgraph query compiler and its command-line front end.
//!
//! ## Features
//!
//! - TOML configuration files
//! - Environment variable overrides
//! - Pagination limits consumed by the request normalizer
//! - Graph database connection descriptor
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shopgraph_config::ShopgraphConfig;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ShopgraphConfig::load(Some(Path::new("shopgraph.toml")))?;
//!     println!("max page size: {}", config.paging.max_page_size);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
mod error;
mod loader;

pub use components::*;
pub use error::{ConfigError, ConfigResult};
pub use loader::*;
