//! Engine lock tests: expansion order, dedup, memoization, terminal
//! handling, best-effort fallback, and exhaustion.

use std::collections::HashSet;

use lock_tests::fixtures::two_rank_deal;
use lookahead_harness::worlds::graph::{GraphBuilder, GraphState, GraphWorld};
use lookahead_harness::worlds::patience::PatienceState;
use lookahead_search::{
    EngineStatus, FrontierOrder, Heuristic, SearchEngine, SearchError, SearchPolicy, SearchState,
    ZeroHeuristic,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Step to exhaustion, returning popped f-costs and the popped states.
fn drain<T, H>(engine: &mut SearchEngine<T, H>, cap: usize) -> (Vec<u32>, Vec<T>)
where
    T: SearchState,
    H: Heuristic<T>,
{
    let mut costs = Vec::new();
    let mut states = Vec::new();
    for _ in 0..cap {
        match engine.step() {
            Ok(node) => {
                costs.push(node.f_cost());
                states.push(engine.state(&node).unwrap().clone());
            }
            Err(SearchError::EmptyFrontier) => return (costs, states),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    panic!("search did not exhaust within {cap} steps");
}

fn assert_non_decreasing(costs: &[u32]) {
    for (i, pair) in costs.windows(2).enumerate() {
        assert!(
            pair[0] <= pair[1],
            "pop {} had f-cost {} after {}",
            i + 1,
            pair[1],
            pair[0]
        );
    }
}

// ---------------------------------------------------------------------------
// Expansion order
// ---------------------------------------------------------------------------

#[test]
fn expansion_order_is_monotonic_on_grid() {
    init_logging();
    let world = GraphWorld::grid(6, 5);
    let mut engine = SearchEngine::new(world.state("0,0"), world.heuristic());
    let (costs, _) = drain(&mut engine, 1_000);
    assert_eq!(costs.len(), 30);
    assert_non_decreasing(&costs);
}

#[test]
fn expansion_order_is_monotonic_on_patience() {
    init_logging();
    let root = PatienceState::shuffled(3, lookahead_cards::Rank::Three, 11);
    let mut engine = SearchEngine::new(root, PatienceState::remaining_heuristic);
    let (costs, _) = drain(&mut engine, 200_000);
    assert_non_decreasing(&costs);
}

#[test]
fn exact_pop_order_on_small_graph() {
    let world = GraphBuilder::new()
        .edge("S", "a")
        .edge("S", "b")
        .edge("a", "g")
        .edge("b", "c")
        .edge("c", "g")
        .h("a", 2)
        .h("b", 1)
        .h("c", 3)
        .win("g")
        .build();
    let mut engine = SearchEngine::new(world.state("S"), world.heuristic());
    let mut order = Vec::new();
    loop {
        let node = engine.step().unwrap();
        let state = engine.state(&node).unwrap();
        order.push(state.name().to_string());
        if state.is_win() {
            break;
        }
    }
    assert_eq!(order, vec!["S", "b", "a", "g"]);
}

#[test]
fn equal_costs_pop_in_generation_order() {
    let world = GraphBuilder::new()
        .edge("r", "x")
        .edge("r", "y")
        .edge("r", "z")
        .build();
    let mut engine = SearchEngine::new(world.state("r"), ZeroHeuristic);
    let (_, states) = drain(&mut engine, 10);
    let names: Vec<&str> = states.iter().map(GraphState::name).collect();
    assert_eq!(names, vec!["r", "x", "y", "z"]);
}

// ---------------------------------------------------------------------------
// No re-expansion
// ---------------------------------------------------------------------------

#[test]
fn every_state_is_popped_at_most_once() {
    let world = GraphWorld::grid(5, 5);
    let mut engine = SearchEngine::new(world.state("0,0"), ZeroHeuristic);
    let (_, states) = drain(&mut engine, 1_000);

    let distinct: HashSet<usize> = states.iter().map(GraphState::node).collect();
    assert_eq!(distinct.len(), states.len(), "a state was popped twice");
    assert_eq!(engine.visited_len(), distinct.len());
    assert_eq!(engine.visited_len(), world.node_count());
    assert!(engine.stats().duplicates_suppressed > 0);
}

#[test]
fn visited_count_matches_distinct_patience_states() {
    let root = PatienceState::shuffled(3, lookahead_cards::Rank::Three, 5);
    let mut engine = SearchEngine::new(root, ZeroHeuristic);
    let (_, states) = drain(&mut engine, 200_000);

    let distinct: HashSet<PatienceState> = states.iter().cloned().collect();
    assert_eq!(distinct.len(), states.len());
    assert_eq!(engine.visited_len(), states.len());
}

// ---------------------------------------------------------------------------
// Successor memoization
// ---------------------------------------------------------------------------

#[test]
fn successors_generated_once_per_expanded_state() {
    let world = GraphWorld::grid(4, 4);
    let mut engine = SearchEngine::new(world.state("0,0"), ZeroHeuristic);
    while engine.step().is_ok() {}
    assert_eq!(world.total_successor_calls(), world.node_count());
}

#[test]
fn successor_accessor_returns_cached_slice() {
    let world = GraphBuilder::new().edge("r", "x").edge("r", "y").build();
    let mut engine = SearchEngine::new(world.state("r"), ZeroHeuristic);
    let root = engine.step().unwrap();
    assert_eq!(world.successor_calls("r"), 1);

    let first = engine.successors(&root).unwrap();
    let second = engine.successors(&root).unwrap();
    assert!(std::ptr::eq(first, second));
    let names: Vec<&str> = first.iter().map(GraphState::name).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(world.successor_calls("r"), 1, "accessor must not regenerate");
}

// ---------------------------------------------------------------------------
// Terminal detection and best-effort solve
// ---------------------------------------------------------------------------

#[test]
fn dead_end_is_returned_by_solve() {
    let world = GraphBuilder::new().edge("R", "B").h("B", 5).build();
    let mut engine = SearchEngine::new(world.state("R"), world.heuristic());
    let node = engine.solve().unwrap();
    assert_eq!(engine.state(&node).unwrap().name(), "B");
    assert_eq!(node.f_cost(), 6);
    assert_eq!(engine.stats().generated, 1, "dead end generated nothing");
}

#[test]
fn solve_prefers_lowest_cost_non_root() {
    let world = GraphBuilder::new()
        .edge("R", "x")
        .edge("R", "y")
        .edge("x", "z")
        .h("R", 0)
        .h("x", 9)
        .h("y", 4)
        .h("z", 1)
        .build();
    let mut engine = SearchEngine::new(world.state("R"), world.heuristic());
    let node = engine.solve().unwrap();
    assert_eq!(engine.state(&node).unwrap().name(), "z");
    assert_eq!(node.f_cost(), 3);
}

#[test]
fn solve_falls_back_to_nodes_popped_by_earlier_steps() {
    let world = GraphBuilder::new()
        .edge("R", "a")
        .edge("R", "b")
        .edge("b", "c")
        .h("b", 3)
        .h("c", 9)
        .build();
    let mut engine = SearchEngine::new(world.state("R"), world.heuristic());
    engine.step().unwrap();
    let early = engine.step().unwrap();
    assert_eq!(engine.state(&early).unwrap().name(), "a");

    let node = engine.solve().unwrap();
    assert_eq!(engine.state(&node).unwrap().name(), "a");
    assert_eq!(node.f_cost(), 1);
}

#[test]
fn highest_first_solve_still_returns_lowest_cost() {
    let world = GraphBuilder::new()
        .edge("R", "x")
        .edge("R", "y")
        .h("x", 2)
        .h("y", 8)
        .build();
    let policy = SearchPolicy {
        order: FrontierOrder::HighestFirst,
        ..SearchPolicy::default()
    };
    let mut engine = SearchEngine::with_policy(world.state("R"), world.heuristic(), policy);
    let node = engine.solve().unwrap();
    assert_eq!(engine.state(&node).unwrap().name(), "x");
    assert_eq!(node.f_cost(), 3);
}

#[test]
fn solve_on_root_without_moves_returns_root() {
    let world = GraphBuilder::new().node("alone").build();
    let mut engine = SearchEngine::new(world.state("alone"), ZeroHeuristic);
    let node = engine.solve().unwrap();
    assert!(node.is_root());
    assert_eq!(engine.status(), EngineStatus::Exhausted);
}

#[test]
fn solve_reaches_patience_win() {
    for hide_bottom in [false, true] {
        let mut engine =
            SearchEngine::new(two_rank_deal(hide_bottom), PatienceState::remaining_heuristic);
        let node = engine.solve().unwrap();
        let state = engine.state(&node).unwrap();
        assert!(state.is_win(), "deal should be cleared: {state}");
        assert_eq!(node.path_cost(), 8);
        assert_eq!(state.cards_remaining(), 0);
    }
}

#[test]
fn solve_stops_at_first_goal_and_can_continue() {
    let world = GraphBuilder::new()
        .edge("R", "g1")
        .edge("R", "x")
        .edge("x", "g2")
        .win("g1")
        .win("g2")
        .build();
    let mut engine = SearchEngine::new(world.state("R"), ZeroHeuristic);
    let first = engine.solve().unwrap();
    assert_eq!(engine.state(&first).unwrap().name(), "g1");
    assert_eq!(engine.status(), EngineStatus::Expanding);

    let second = engine.solve().unwrap();
    assert_eq!(engine.state(&second).unwrap().name(), "g2");
}

// ---------------------------------------------------------------------------
// Exhaustion
// ---------------------------------------------------------------------------

#[test]
fn step_on_exhausted_engine_fails_with_empty_frontier() {
    let world = GraphBuilder::new().edge("R", "x").build();
    let mut engine = SearchEngine::new(world.state("R"), ZeroHeuristic);
    engine.solve().unwrap();
    assert_eq!(engine.status(), EngineStatus::Exhausted);
    assert_eq!(engine.step().unwrap_err(), SearchError::EmptyFrontier);
    assert_eq!(engine.solve().unwrap_err(), SearchError::EmptyFrontier);
}

#[test]
fn resumed_engine_skips_history() {
    let world = GraphBuilder::new()
        .edge("R", "x")
        .edge("R", "y")
        .edge("y", "g")
        .edge("x", "g")
        .win("g")
        .build();
    let mut engine = SearchEngine::resume(
        world.state("R"),
        ZeroHeuristic,
        SearchPolicy::default(),
        vec![world.state("x")],
    );
    let goal = engine.solve().unwrap();
    assert_eq!(goal.initial_move().map(|m| world.name(m.to)), Some("y"));
    assert_eq!(world.successor_calls("x"), 0);
}
