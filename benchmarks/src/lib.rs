//! Shared helpers for lookahead benchmark suites.

use lookahead_cards::Rank;
use lookahead_harness::worlds::graph::{GraphState, GraphWorld};
use lookahead_harness::worlds::patience::PatienceState;
use lookahead_search::{
    Frontier, FrontierOrder, SearchEngine, SearchNode, SearchPolicy, SearchStats, VisitedSet,
};

/// A named patience deal used across benchmark groups.
pub struct Deal {
    pub name: &'static str,
    pub piles: usize,
    pub target: Rank,
    pub seed: u64,
}

/// Deals of increasing size.
#[must_use]
pub fn standard_deals() -> Vec<Deal> {
    vec![
        Deal {
            name: "two_ranks",
            piles: 4,
            target: Rank::Two,
            seed: 1,
        },
        Deal {
            name: "three_ranks",
            piles: 4,
            target: Rank::Three,
            seed: 7,
        },
        Deal {
            name: "four_ranks",
            piles: 5,
            target: Rank::Four,
            seed: 13,
        },
    ]
}

impl Deal {
    #[must_use]
    pub fn root(&self) -> PatienceState {
        PatienceState::shuffled(self.piles, self.target, self.seed)
    }
}

/// Solve a grid world from the origin corner. Returns the stats.
///
/// # Panics
///
/// Panics if `solve` fails. A grid always has a reachable goal.
#[must_use]
pub fn solve_grid(world: &GraphWorld, policy: &SearchPolicy) -> SearchStats {
    let mut engine =
        SearchEngine::with_policy(world.state("0,0"), world.heuristic(), policy.clone());
    engine.solve().expect("grid solve should succeed in benchmarks");
    engine.stats()
}

/// Solve a deal, accepting a best-effort result when no win is reachable.
///
/// # Panics
///
/// Panics if `solve` fails, which only happens on an exhausted engine.
#[must_use]
pub fn solve_deal(deal: &Deal) -> SearchStats {
    let mut engine = SearchEngine::new(deal.root(), PatienceState::remaining_heuristic);
    engine.solve().expect("deal solve should succeed in benchmarks");
    engine.stats()
}

/// Pick a move for a deal. Returns `None` when the deal has no opening move.
#[must_use]
pub fn best_move_for_deal(deal: &Deal) -> Option<u32> {
    let mut engine = SearchEngine::new(deal.root(), PatienceState::remaining_heuristic);
    engine.get_best_move().ok().map(|best| best.node.f_cost())
}

/// Intern `n` grid states and wrap each in a depth-one node with a
/// pseudo-random heuristic, ready for frontier benchmarks.
#[must_use]
pub fn frontier_nodes(
    world: &GraphWorld,
    n: usize,
) -> (VisitedSet<GraphState>, Vec<SearchNode<GraphState>>) {
    let mut visited = VisitedSet::new();
    let mut nodes = Vec::with_capacity(n);
    let count = world.node_count().max(1);
    for i in 0..n {
        let id = visited.insert(world.state(world.name(i % count)));
        let order = u64::try_from(i).unwrap_or(u64::MAX);
        let h = u32::try_from((i * 7919) % 97).unwrap_or(0);
        nodes.push(SearchNode::new(id, 1, h, None, order));
    }
    (visited, nodes)
}

/// Push every node, then pop until empty.
#[must_use]
pub fn churn_frontier(nodes: Vec<SearchNode<GraphState>>, order: FrontierOrder) -> u64 {
    let mut frontier = Frontier::new(order);
    for node in nodes {
        frontier.push(node);
    }
    let mut checksum = 0u64;
    while let Some(node) = frontier.pop() {
        checksum = checksum.wrapping_add(u64::from(node.f_cost()));
    }
    checksum
}
