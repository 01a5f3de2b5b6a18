//! Lookahead Search: deterministic best-first (A*-family) search.
//!
//! This crate is domain-agnostic. States come from the caller through the
//! [`SearchState`] contract and are scored by a [`Heuristic`]; the engine
//! owns everything else.
//!
//! # Crate dependency graph
//!
//! ```text
//! lookahead_cards  ←  lookahead_harness  →  lookahead_search
//! (card values)       (fixture worlds)      (frontier, nodes, engine)
//! ```
//!
//! # Key types
//!
//! - [`SearchNode`]: immutable node holding a state handle, g, h and memoized successors
//! - [`VisitedSet`]: canonical state arena with epoch-checked [`StateId`]s
//! - [`Frontier`]: f-cost priority queue with creation-order tie-break
//! - [`SearchEngine`]: `step`, `solve`, and `get_best_move`
//! - [`SearchPolicy`]: depth limit, frontier order, progress interval

#![forbid(unsafe_code)]

pub mod contract;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod stats;
pub mod visited;

pub use contract::SearchState;
pub use engine::{BestMove, EngineStatus, SearchEngine};
pub use error::SearchError;
pub use frontier::{Frontier, FrontierKey};
pub use heuristic::{Heuristic, ZeroHeuristic};
pub use node::SearchNode;
pub use policy::{FrontierOrder, SearchPolicy};
pub use stats::SearchStats;
pub use visited::{StateId, VisitedSet};
