//! Property tests over arbitrary explore requests.

use proptest::prelude::*;
use shopgraph_config::PagingConfig;
use shopgraph_query::{sanitize, FilterRequest, NodeLabel, QueryCompiler};

const FILTER_LABELS: [NodeLabel; 6] = [
    NodeLabel::Cancel,
    NodeLabel::Order,
    NodeLabel::Return,
    NodeLabel::Shipment,
    NodeLabel::Storage,
    NodeLabel::Supplier,
];

fn filter_request() -> impl Strategy<Value = FilterRequest> {
    (
        proptest::option::of("[a-z'\" ]{0,12}"),
        proptest::collection::vec(any::<bool>(), 6),
        proptest::option::of(any::<i64>().prop_map(|n| n.to_string())),
    )
        .prop_map(|(keyword, flags, limit)| {
            let mut request = FilterRequest::new();
            request.keyword = keyword;
            request.limit = limit;
            for (label, on) in FILTER_LABELS.into_iter().zip(flags) {
                if on {
                    request = request.with_filter(label, "x");
                }
            }
            request
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn compilation_is_deterministic(request in filter_request()) {
        let compiler = QueryCompiler::default();
        prop_assert_eq!(compiler.explore(&request), compiler.explore(&request.clone()));
    }

    #[test]
    fn filter_insertion_order_is_irrelevant(request in filter_request()) {
        let mut reversed = FilterRequest::new();
        reversed.keyword = request.keyword.clone();
        reversed.limit = request.limit.clone();
        for (label, value) in request.filters.iter().rev() {
            reversed = reversed.with_filter(*label, value.clone());
        }

        let compiler = QueryCompiler::default();
        prop_assert_eq!(compiler.explore(&request), compiler.explore(&reversed));
    }

    #[test]
    fn order_count_needs_keyword_and_order(request in filter_request()) {
        let query = QueryCompiler::default().explore(&request);
        let keyword = request
            .keyword
            .as_deref()
            .is_some_and(|k| k.chars().any(|c| c != '\'' && c != '"'));
        let order = request.filters.contains_key(&NodeLabel::Order);

        prop_assert_eq!(query.as_str().contains("order_count"), keyword && order);
    }

    #[test]
    fn keyword_quotes_never_reach_output(keyword in ".*") {
        let compiler = QueryCompiler::default();
        let query = compiler.explore(&FilterRequest::new().with_keyword(keyword.clone()));

        // Same clause shape with a harmless keyword: only our own delimiters
        let baseline = if sanitize(&keyword).is_empty() {
            compiler.explore(&FilterRequest::new())
        } else {
            compiler.explore(&FilterRequest::new().with_keyword("a"))
        };

        prop_assert_eq!(
            query.as_str().matches('\'').count(),
            baseline.as_str().matches('\'').count()
        );
        prop_assert!(!query.as_str().contains('"'));
    }

    #[test]
    fn cancel_requires_order(keyword in proptest::option::of("[a-z]{1,6}"), order in any::<bool>()) {
        let mut request = FilterRequest::new()
            .with_filter(NodeLabel::Cancel, "c1")
            .with_filter(NodeLabel::Return, "r1")
            .with_filter(NodeLabel::Shipment, "s1");
        request.keyword = keyword;
        if order {
            request = request.with_filter(NodeLabel::Order, "o1");
        }

        let query = QueryCompiler::default().explore(&request);
        let text = query.as_str();

        for needle in ["IS_CANCELED_BY", "IS_RETURNED_BY", "IS_SHIPPED_BY", " cancel", "r3"] {
            prop_assert_eq!(text.contains(needle), order, "{} presence mismatch", needle);
        }
    }

    #[test]
    fn limit_always_within_bounds(raw in proptest::option::of(".{0,8}"), max in 1u32..200) {
        let paging = PagingConfig::new(10, max);
        let mut request = FilterRequest::new();
        request.limit = raw;

        let plan = QueryCompiler::new(paging).plan_explore(&request);
        let limit = plan.limit.unwrap_or(0);

        prop_assert!(limit >= 1 && limit <= u64::from(max));
    }
}
