//! Searchable state contract trait.

use std::hash::Hash;

/// Trait for states the engine can search over.
///
/// # Contract
///
/// - `Eq` and `Hash` define "same state" for visited-set dedup. They may
///   ignore information a player cannot see, and should ignore
///   [`last_move`](Self::last_move).
/// - `successors` must be deterministic: the same state yields the same
///   successors in the same order. An empty list means no legal moves
///   (a dead end or a won position).
pub trait SearchState: Clone + Eq + Hash {
    /// The move type that labels edges between states.
    type Move: Clone;

    /// Every state reachable in one move, in generation order.
    fn successors(&self) -> Vec<Self>;

    /// Test whether this state is a goal.
    fn is_win(&self) -> bool;

    /// The move that produced this state from its predecessor.
    ///
    /// `None` for a root state that was not produced by a move.
    fn last_move(&self) -> Option<Self::Move>;
}
