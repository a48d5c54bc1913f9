use anyhow::Result;
use shopgraph_config::ShopgraphConfig;
use shopgraph_query::{FilterRequest, NodeLabel, QueryCompiler};
use tracing::info;

use crate::cli::ExploreArgs;
use crate::output::{format_query, OutputFormat};

/// Build the filter request carried by the explore flags
pub fn filter_request(args: ExploreArgs) -> FilterRequest {
    let filters = [
        (NodeLabel::Cancel, args.cancel),
        (NodeLabel::Order, args.order),
        (NodeLabel::Return, args.return_),
        (NodeLabel::Shipment, args.shipment),
        (NodeLabel::Storage, args.storage),
        (NodeLabel::Supplier, args.supplier),
    ];

    let mut request = FilterRequest::new();
    if let Some(keyword) = args.keyword {
        request = request.with_keyword(keyword);
    }
    for (label, value) in filters {
        if let Some(value) = value {
            request = request.with_filter(label, value);
        }
    }
    if let Some(order_by) = args.order_by {
        request = request.with_order_by(order_by);
    }
    if let Some(limit) = args.limit {
        request = request.with_limit(limit);
    }
    request
}

pub fn execute(config: &ShopgraphConfig, args: ExploreArgs, format: OutputFormat) -> Result<String> {
    let request = filter_request(args);
    info!(filters = request.filters.len(), "Compiling explore query");

    let compiler = QueryCompiler::new(config.paging);
    format_query(&compiler.explore(&request), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_filters() {
        let request = filter_request(ExploreArgs {
            keyword: Some("lamp".to_string()),
            order: Some("o1".to_string()),
            return_: Some("r1".to_string()),
            limit: Some("3".to_string()),
            ..ExploreArgs::default()
        });

        assert_eq!(request.keyword.as_deref(), Some("lamp"));
        assert_eq!(request.filters.get(&NodeLabel::Order).map(String::as_str), Some("o1"));
        assert_eq!(request.filters.get(&NodeLabel::Return).map(String::as_str), Some("r1"));
        assert!(!request.filters.contains_key(&NodeLabel::Supplier));
        assert_eq!(request.limit.as_deref(), Some("3"));
        assert_eq!(request.order_by, None);
    }

    #[test]
    fn test_execute_text() {
        let args = ExploreArgs {
            storage: Some("s1".to_string()),
            ..ExploreArgs::default()
        };
        let output = execute(&ShopgraphConfig::default(), args, OutputFormat::Text).unwrap();
        assert_eq!(
            output,
            "MATCH (product: Product)\n\
             OPTIONAL MATCH (storage: Storage)-[r6:STORES]->(product: Product)\n\
             RETURN product, storage, r6\n\
             LIMIT 10"
        );
    }

    #[test]
    fn test_execute_uses_configured_paging() {
        let mut config = ShopgraphConfig::default();
        config.paging.max_page_size = 4;
        let args = ExploreArgs {
            limit: Some("100".to_string()),
            ..ExploreArgs::default()
        };
        let output = execute(&config, args, OutputFormat::Text).unwrap();
        assert!(output.ends_with("LIMIT 4"));
    }
}
