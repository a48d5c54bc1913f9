//! Pagination configuration
//!
//! Limits applied by the request normalizer when resolving the `limit` of an
//! explore query.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Page size used when a request carries no usable limit
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for any resolved explore limit
pub const MAX_PAGE_SIZE: u32 = 50;

/// Pagination configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Limit used when the request omits one or supplies garbage
    pub default_page_size: u32,
    /// Inclusive ceiling for resolved limits
    pub max_page_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PagingConfig {
    /// Create a paging configuration with explicit sizes
    pub fn new(default_page_size: u32, max_page_size: u32) -> Self {
        Self {
            default_page_size,
            max_page_size,
        }
    }

    /// Reject sizes that would make the `[1, max]` clamp meaningless
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_page_size < 1 {
            return Err(ConfigError::invalid(
                "paging.max_page_size",
                "must be at least 1",
            ));
        }
        if self.default_page_size < 1 {
            return Err(ConfigError::invalid(
                "paging.default_page_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Clamp a requested page size into `[1, max_page_size]`
    pub fn clamp(&self, requested: i64) -> u32 {
        let max = i64::from(self.max_page_size.max(1));
        // Bounded by max, which came from a u32
        requested.clamp(1, max) as u32
    }
}
