//! JSON policy documents drive the engine; stats render as JSON.

use lock_tests::fixtures::{layer_node, layered_world};
use lookahead_harness::worlds::graph::GraphWorld;
use lookahead_search::{FrontierOrder, SearchEngine, SearchError, SearchPolicy, ZeroHeuristic};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn policy_document_sets_depth_limit() {
    let policy = SearchPolicy::from_json(r#"{ "depth_limit": 3 }"#).unwrap();
    assert_eq!(policy, SearchPolicy::depth_limited(3));

    let world = layered_world(2, 5);
    let mut engine =
        SearchEngine::with_policy(world.state(&layer_node(0, 0)), world.heuristic(), policy);
    let node = engine.solve().unwrap();
    assert!(node.path_cost() <= 3);
    assert_eq!(engine.stats().max_depth_seen, 3);
}

#[test]
fn policy_document_sets_frontier_order() {
    let policy = SearchPolicy::from_json(r#"{ "order": "highest_first" }"#).unwrap();
    assert_eq!(policy.order, FrontierOrder::HighestFirst);
    assert_eq!(policy.depth_limit, 0);

    // From the centre, highest-first takes the neighbour farthest from the
    // goal; of the two tied at h = 3 the earlier-generated one.
    let world = GraphWorld::grid(3, 3);
    let mut engine = SearchEngine::with_policy(world.state("1,1"), world.heuristic(), policy);
    engine.step().unwrap();
    let next = engine.step().unwrap();
    assert_eq!(next.f_cost(), 1 + 3);
    assert_eq!(engine.state(&next).unwrap().name(), "0,1");
}

#[test]
fn policy_round_trips_through_json() {
    let policy = SearchPolicy {
        depth_limit: 7,
        order: FrontierOrder::HighestFirst,
        progress_interval: 500,
    };
    let text = policy.to_json().unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["order"], "highest_first");
    assert_eq!(SearchPolicy::from_json(&text).unwrap(), policy);
}

#[test]
fn malformed_policy_is_rejected() {
    for text in [
        r#"{ "depth_limt": 3 }"#,
        r#"{ "order": "sideways" }"#,
        r#"{ "depth_limit": -1 }"#,
        "not json",
    ] {
        let err = SearchPolicy::from_json(text).unwrap_err();
        assert!(
            matches!(err, SearchError::InvalidPolicy { .. }),
            "{text}: {err:?}"
        );
    }
}

#[test]
fn stats_report_as_json() {
    let world = GraphWorld::grid(3, 3);
    let mut engine = SearchEngine::new(world.state("0,0"), ZeroHeuristic);
    while engine.step().is_ok() {}

    let stats = engine.stats();
    let value: Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
    assert_eq!(value["expansions"], 9);
    assert_eq!(value["generated"], 8);
    assert_eq!(value["max_depth_seen"], 4);
    assert_eq!(value["depth_deferred"], 0);
    assert!(value["frontier_high_water"].as_u64().unwrap() >= 2);
    assert_eq!(
        value["duplicates_suppressed"].as_u64().unwrap(),
        stats.duplicates_suppressed
    );
}
