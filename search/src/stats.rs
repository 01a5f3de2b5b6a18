//! Expansion counters for diagnostics and reports.
//!
//! Nothing in the engine reads these back to make decisions.

use serde::Serialize;

/// Aggregate counters for one engine.
///
/// Counters accumulate across `step`, `solve` and every `get_best_move`
/// branch; they are not reset when the visited set is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped from the frontier.
    pub expansions: u64,
    /// Child nodes pushed onto the frontier.
    pub generated: u64,
    /// Successors skipped because an equal state was already visited.
    pub duplicates_suppressed: u64,
    /// Popped nodes left unexpanded by the depth limit.
    pub depth_deferred: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
    /// Deepest path cost popped so far.
    pub max_depth_seen: u32,
}

impl SearchStats {
    /// Render as a single-line JSON object.
    ///
    /// # Errors
    ///
    /// Propagates the `serde_json` serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
