//! Search policy types.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Direction in which the frontier pops f-costs.
///
/// Only the pop order changes. Outcomes are always compared lowest f-cost
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierOrder {
    /// Lowest f-cost first. The forward-search default.
    #[default]
    LowestFirst,
    /// Highest f-cost first.
    HighestFirst,
}

/// Search budget and diagnostics configuration.
///
/// Every field has a default, so a policy document only needs to name the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Nodes with `path_cost >= depth_limit` are returned by `step` but not
    /// expanded. `0` disables the limit.
    pub depth_limit: u32,
    /// Frontier direction.
    pub order: FrontierOrder,
    /// Emit a progress record every this many expansions. `0` is silent.
    pub progress_interval: u64,
}

impl SearchPolicy {
    /// An unlimited policy with a depth cutoff.
    #[must_use]
    pub fn depth_limited(depth_limit: u32) -> Self {
        Self {
            depth_limit,
            ..Self::default()
        }
    }

    /// Parse a JSON policy document.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] on malformed JSON, unknown
    /// fields, or out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, SearchError> {
        serde_json::from_str(text).map_err(|e| SearchError::InvalidPolicy {
            detail: e.to_string(),
        })
    }

    /// Serialize to a JSON policy document.
    ///
    /// # Errors
    ///
    /// Propagates the `serde_json` serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn has_depth_limit(&self) -> bool {
        self.depth_limit != 0
    }

    /// Whether a node at `path_cost` may be expanded under the depth limit.
    #[must_use]
    pub fn allows_expansion(&self, path_cost: u32) -> bool {
        !self.has_depth_limit() || path_cost < self.depth_limit
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            depth_limit: 0,
            order: FrontierOrder::LowestFirst,
            progress_interval: 0,
        }
    }
}
