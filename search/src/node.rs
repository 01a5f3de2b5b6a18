//! Core search node type.

use std::cell::OnceCell;

use crate::contract::SearchState;
use crate::visited::StateId;

/// An immutable search node in the frontier.
///
/// The node refers to its state through a [`StateId`] owned by the engine's
/// visited set. Successors are generated lazily, at most once per node, and
/// cached for the node's lifetime.
#[derive(Debug, Clone)]
pub struct SearchNode<T: SearchState> {
    state: StateId,
    path_cost: u32,
    heuristic: u32,
    creation_order: u64,
    initial_move: Option<T::Move>,
    successors: OnceCell<Vec<T>>,
}

impl<T: SearchState> SearchNode<T> {
    #[must_use]
    pub fn new(
        state: StateId,
        path_cost: u32,
        heuristic: u32,
        initial_move: Option<T::Move>,
        creation_order: u64,
    ) -> Self {
        Self {
            state,
            path_cost,
            heuristic,
            creation_order,
            initial_move,
            successors: OnceCell::new(),
        }
    }

    /// Handle of this node's state in the visited set.
    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state
    }

    /// Moves taken from the root (g).
    #[must_use]
    pub fn path_cost(&self) -> u32 {
        self.path_cost
    }

    /// Heuristic estimate of the remaining cost (h).
    #[must_use]
    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }

    /// Compute `f_cost = path_cost + heuristic` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> u32 {
        self.path_cost.saturating_add(self.heuristic)
    }

    /// Engine-wide counter for deterministic tie-breaking.
    #[must_use]
    pub fn creation_order(&self) -> u64 {
        self.creation_order
    }

    /// First move on the path from the root to this node.
    ///
    /// `None` on the root.
    #[must_use]
    pub fn initial_move(&self) -> Option<&T::Move> {
        self.initial_move.as_ref()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path_cost == 0
    }

    /// Successors of `state`, which must be this node's state.
    ///
    /// Generated on the first call and cached; later calls return the same
    /// slice without touching `state`.
    pub fn successors<'a>(&'a self, state: &T) -> &'a [T] {
        self.successors.get_or_init(|| state.successors())
    }

    /// Cached successors, if they have been generated.
    #[must_use]
    pub fn cached_successors(&self) -> Option<&[T]> {
        self.successors.get().map(Vec::as_slice)
    }
}
