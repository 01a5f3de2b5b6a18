//! Hand-built worlds with known answers.

use lookahead_cards::{Card, CardPile, Rank, Suit};
use lookahead_harness::worlds::graph::{GraphBuilder, GraphWorld};
use lookahead_harness::worlds::patience::PatienceState;

/// Root `R` with two moves: to `A`, a win (h = 0), and to `B`, a dead end
/// (h = 5). `b_first` puts the dead end first in generation order.
#[must_use]
pub fn two_branch_world(b_first: bool) -> GraphWorld {
    let builder = if b_first {
        GraphBuilder::new().edge("R", "B").edge("R", "A")
    } else {
        GraphBuilder::new().edge("R", "A").edge("R", "B")
    };
    builder.win("A").h("B", 5).build()
}

/// Name of node `index` in layer `depth` of [`layered_world`].
#[must_use]
pub fn layer_node(depth: u32, index: u32) -> String {
    format!("d{depth}n{index}")
}

/// Complete bipartite layers: every node of layer `d` links to every node of
/// layer `d + 1`. Layer 0 is the single root `d0n0`. Only nodes in the last
/// layer (`depth`) are wins. Heuristic is the number of layers left.
#[must_use]
pub fn layered_world(width: u32, depth: u32) -> GraphWorld {
    let mut builder = GraphBuilder::new().node(&layer_node(0, 0));
    for d in 0..depth {
        let from_width = if d == 0 { 1 } else { width };
        for i in 0..from_width {
            let from = layer_node(d, i);
            builder = builder.h(&from, depth - d);
            for j in 0..width {
                builder = builder.edge(&from, &layer_node(d + 1, j));
            }
        }
    }
    for j in 0..width {
        builder = builder.win(&layer_node(depth, j));
    }
    builder.build()
}

/// Four face-up piles `[2x, Ax]`, one per suit, cleared at rank two in
/// exactly eight moves.
#[must_use]
pub fn two_rank_deal(hide_bottom: bool) -> PatienceState {
    let hidden = usize::from(hide_bottom);
    let tableau = Suit::ALL
        .iter()
        .map(|&suit| {
            CardPile::new(
                vec![Card::new(Rank::Two, suit), Card::new(Rank::Ace, suit)],
                hidden,
            )
        })
        .collect();
    PatienceState::deal(tableau, Rank::Two)
}
