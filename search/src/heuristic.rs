//! Heuristic trait and the uniform-cost default.

/// Estimate of the remaining cost from a state to a goal.
///
/// The engine never checks admissibility. An overestimating heuristic loses
/// optimality guarantees but never termination.
pub trait Heuristic<T> {
    fn estimate(&self, state: &T) -> u32;
}

impl<T, F> Heuristic<T> for F
where
    F: Fn(&T) -> u32,
{
    fn estimate(&self, state: &T) -> u32 {
        self(state)
    }
}

/// Default heuristic: 0 for every state, which turns the search into
/// uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<T> Heuristic<T> for ZeroHeuristic {
    fn estimate(&self, _state: &T) -> u32 {
        0
    }
}
