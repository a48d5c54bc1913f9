//! Request normalization.
//!
//! Turns raw, untrusted request fields into a normalized request the planners
//! can consume without further checks. Normalization never fails: bad limits,
//! empty filters and unknown parameters all degrade to defaults.

use serde::{Deserialize, Serialize};
use shopgraph_config::PagingConfig;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

use crate::schema::{LabelSet, NodeLabel};

/// Sort expression applied when the caller does not supply one
pub const DEFAULT_ORDER_BY: &str = "order_count DESC";

/// Name of the aggregate the default sort refers to
pub const ORDER_COUNT: &str = "order_count";

/// Query parameter carrying the inspect-mode limit
pub const LIMIT_PARAM: &str = "limit";

/// Strip characters that could terminate or escape an embedded string literal.
///
/// Literals are substituted into query text, not bound as parameters.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '\\'))
        .collect()
}

// ============================================================================
// Explore requests
// ============================================================================

/// Raw explore request as received from the transport layer.
///
/// Every field is independently optional; `Some("")` is kept distinct from
/// `None` here and only collapsed during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// Free-text search term
    pub keyword: Option<String>,
    /// Per-label presence filters keyed by persisted label
    #[serde(default)]
    pub filters: BTreeMap<NodeLabel, String>,
    /// Sort expression; defaults to [`DEFAULT_ORDER_BY`]
    pub order_by: Option<String>,
    /// Unparsed page size
    pub limit: Option<String>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Set a label filter. A `Keyword` filter sets the search term.
    pub fn with_filter(mut self, label: NodeLabel, value: impl Into<String>) -> Self {
        if label.is_virtual() {
            self.keyword = Some(value.into());
        } else {
            self.filters.insert(label, value.into());
        }
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }
}

/// Explore request after sanitization and defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRequest {
    /// Sanitized, non-empty search term
    pub keyword: Option<String>,
    /// Labels whose filters are present, including `Keyword` for a search term
    pub present: LabelSet,
    /// Effective sort expression; `None` means no ORDER BY line
    pub order_by: Option<String>,
    /// Resolved page size, always within `[1, max_page_size]`
    pub limit: u32,
}

impl NormalizedRequest {
    pub fn is_present(&self, label: NodeLabel) -> bool {
        self.present.contains(label)
    }

    /// True when the effective sort refers to the order-count aggregate
    pub fn sorts_by_order_count(&self) -> bool {
        self.order_by
            .as_deref()
            .is_some_and(|expr| expr.starts_with(ORDER_COUNT))
    }
}

// ============================================================================
// Inspect requests
// ============================================================================

/// Inspect request after limit resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectRequest {
    /// Label exactly as the caller spelled it
    pub label: String,
    /// Query parameters, including the primary key
    pub params: BTreeMap<String, String>,
    /// Positive limit if one was supplied; never defaulted or clamped
    pub limit: Option<u64>,
}

// ============================================================================
// Normalizer
// ============================================================================

/// Validates and defaults raw request fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestNormalizer {
    paging: PagingConfig,
}

impl RequestNormalizer {
    pub fn new(paging: PagingConfig) -> Self {
        Self { paging }
    }

    pub fn paging(&self) -> &PagingConfig {
        &self.paging
    }

    /// Normalize an explore request
    pub fn normalize(&self, request: &FilterRequest) -> NormalizedRequest {
        let keyword = request.keyword.as_deref().and_then(present_text);

        let mut present: LabelSet = request
            .filters
            .iter()
            .filter(|(label, value)| !label.is_virtual() && present_text(value).is_some())
            .map(|(label, _)| *label)
            .collect();
        if keyword.is_some() {
            present.insert(NodeLabel::Keyword);
        }

        let limit = self.resolve_limit(request.limit.as_deref());
        let order_by = self.resolve_order_by(request.order_by.as_deref(), &present);

        trace!(
            labels = present.len(),
            limit,
            sorted = order_by.is_some(),
            "Normalized explore request"
        );

        NormalizedRequest {
            keyword,
            present,
            order_by,
            limit,
        }
    }

    /// Normalize an inspect request; label and key checks belong to the planner
    pub fn normalize_inspection(
        &self,
        label: &str,
        params: &HashMap<String, String>,
    ) -> InspectRequest {
        let limit = params
            .get(LIMIT_PARAM)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|limit| *limit > 0);

        InspectRequest {
            label: label.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            limit,
        }
    }

    fn resolve_limit(&self, raw: Option<&str>) -> u32 {
        let requested = match raw.map(|s| s.trim().parse::<i64>()) {
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                debug!("Unparsable limit {:?} ({}), using default page size", raw, e);
                i64::from(self.paging.default_page_size)
            }
            None => i64::from(self.paging.default_page_size),
        };

        let limit = self.paging.clamp(requested);
        if i64::from(limit) != requested {
            debug!("Clamped limit {} to {}", requested, limit);
        }
        limit
    }

    /// The default sort is dropped unless both the keyword and the order
    /// clauses will be emitted; any other expression passes through.
    fn resolve_order_by(&self, raw: Option<&str>, present: &LabelSet) -> Option<String> {
        let expr = match raw {
            Some(raw) => sanitize(raw).trim().to_string(),
            None => DEFAULT_ORDER_BY.to_string(),
        };
        if expr.is_empty() {
            return None;
        }

        if expr == DEFAULT_ORDER_BY
            && !(present.contains(NodeLabel::Keyword) && present.contains(NodeLabel::Order))
        {
            debug!("Eliding default sort: keyword and order filters are not both present");
            return None;
        }
        Some(expr)
    }
}

/// Sanitized text, or `None` if nothing is left
fn present_text(raw: &str) -> Option<String> {
    let text = sanitize(raw);
    (!text.is_empty()).then_some(text)
}
