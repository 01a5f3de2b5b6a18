//! Typed search errors.
//!
//! Failing to reach a goal is not an error: [`crate::engine::SearchEngine::solve`]
//! returns its best node instead. Every variant here is a local, synchronous
//! failure, and precondition failures leave the engine untouched.

/// Typed failure for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// `step` was called with nothing left to expand.
    #[error("there are no more states to search")]
    EmptyFrontier,

    /// An operation was called in an engine state it does not support.
    #[error("invalid engine state: {detail}")]
    InvalidState { detail: String },

    /// The root state has no successors.
    #[error("the current state has no legal moves")]
    NoLegalMoves,

    /// A state handle from a cleared epoch was dereferenced.
    #[error("state handle from epoch {handle_epoch} used in epoch {current_epoch}")]
    StaleHandle {
        handle_epoch: u64,
        current_epoch: u64,
    },

    /// A policy document could not be parsed.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}

impl SearchError {
    pub(crate) fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState {
            detail: detail.into(),
        }
    }
}
