//! Search engine: expansion loop, best-effort solve, and one-ply move choice.
//!
//! The engine owns its frontier and visited set. Each [`SearchEngine::step`]
//! pops one node, expands it through the visited set, and hands it back, so
//! callers can interleave their own budget or cancellation checks between
//! steps. [`SearchEngine::solve`] and [`SearchEngine::get_best_move`] are
//! loops over `step`.

use log::{debug, info, trace};

use crate::contract::SearchState;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::stats::SearchStats;
use crate::visited::VisitedSet;

/// Coarse engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Constructed; nothing expanded yet.
    Ready,
    /// At least one expansion done and nodes remain on the frontier.
    Expanding,
    /// The frontier is empty.
    Exhausted,
}

/// Result of [`SearchEngine::get_best_move`].
#[derive(Debug, Clone)]
pub struct BestMove<T: SearchState> {
    /// The first move of the winning branch.
    pub mv: T::Move,
    /// The node that ended the winning branch's sub-search.
    ///
    /// Its state handle belongs to a cleared epoch; use [`Self::state`].
    pub node: SearchNode<T>,
    /// Owned copy of the winning branch's final state.
    pub state: T,
}

/// Best-first search over a [`SearchState`] space.
pub struct SearchEngine<T: SearchState, H: Heuristic<T>> {
    heuristic: H,
    policy: SearchPolicy,
    frontier: Frontier<T>,
    visited: VisitedSet<T>,
    history: Vec<T>,
    stats: SearchStats,
    next_creation_order: u64,
    /// The engine's first expansion, kept as the fallback of last resort.
    first_popped: Option<SearchNode<T>>,
    /// Lowest f-cost node popped after the first expansion; earliest on ties.
    best_popped: Option<SearchNode<T>>,
}

impl<T: SearchState, H: Heuristic<T>> SearchEngine<T, H> {
    /// Create an engine rooted at `initial` with the default policy.
    #[must_use]
    pub fn new(initial: T, heuristic: H) -> Self {
        Self::with_policy(initial, heuristic, SearchPolicy::default())
    }

    /// Create an engine rooted at `initial`.
    #[must_use]
    pub fn with_policy(initial: T, heuristic: H, policy: SearchPolicy) -> Self {
        Self::resume(initial, heuristic, policy, Vec::new())
    }

    /// Create an engine whose visited set already holds `history`.
    ///
    /// States in `history` are never pushed onto the frontier, which lets a
    /// caller carry visited-state knowledge from one search into the next.
    #[must_use]
    pub fn resume<I>(initial: T, heuristic: H, policy: SearchPolicy, history: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let history: Vec<T> = history.into_iter().collect();
        let mut engine = Self {
            heuristic,
            frontier: Frontier::new(policy.order),
            policy,
            visited: VisitedSet::new(),
            history,
            stats: SearchStats::default(),
            next_creation_order: 0,
            first_popped: None,
            best_popped: None,
        };
        engine.plant_root(initial);
        engine
    }

    /// Pop the best node and expand it.
    ///
    /// The popped node is expanded if it is the engine's first expansion, if
    /// the depth limit is disabled, or if its path cost is below the limit.
    /// Successors already in the visited set are skipped; every other
    /// successor is recorded and pushed one move deeper.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyFrontier`] if there is nothing left to
    /// expand.
    pub fn step(&mut self) -> Result<SearchNode<T>, SearchError> {
        let next = self.frontier.pop().ok_or(SearchError::EmptyFrontier)?;
        let first_expansion = self.stats.expansions == 0;
        self.stats.expansions += 1;
        self.stats.max_depth_seen = self.stats.max_depth_seen.max(next.path_cost());
        self.report_progress(&next);

        if first_expansion || self.policy.allows_expansion(next.path_cost()) {
            self.expand(&next)?;
        } else {
            self.stats.depth_deferred += 1;
        }
        self.track_best(&next, first_expansion);
        Ok(next)
    }

    /// Search until a goal is popped or the frontier runs dry.
    ///
    /// Returns the first popped node whose state is a win. Without a win,
    /// returns the lowest f-cost node popped so far by this engine, including
    /// nodes popped by earlier `step` calls, but excluding the first
    /// expansion (earliest wins ties). The first expansion is returned only
    /// when nothing else was ever popped. The frontier order does not change
    /// this comparison.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyFrontier`] if the engine was already
    /// exhausted when called.
    pub fn solve(&mut self) -> Result<SearchNode<T>, SearchError> {
        loop {
            let node = self.step()?;
            if self.visited.get(node.state_id())?.is_win() {
                debug!(
                    "goal reached at depth {} after {} expansions",
                    node.path_cost(),
                    self.stats.expansions
                );
                return Ok(node);
            }

            if self.frontier.is_empty() {
                debug!(
                    "frontier exhausted after {} expansions without a goal",
                    self.stats.expansions
                );
                return self
                    .best_popped
                    .clone()
                    .or_else(|| self.first_popped.clone())
                    .ok_or(SearchError::EmptyFrontier);
            }
        }
    }

    /// Choose the move to play now from the root.
    ///
    /// Each legal first move is resolved by its own sub-search, started one
    /// move deep from the root with a visited set holding only the history
    /// and the root. A sub-search ends at the first popped node with no
    /// successors, or when its frontier empties. The branch whose final node
    /// has the lowest f-cost wins, whatever the frontier order; the earlier
    /// branch wins ties.
    ///
    /// Every branch restarts at path cost 1 from the same root, which is what
    /// makes their f-costs comparable. The engine is exhausted afterwards.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidState`] if the frontier does not hold exactly
    ///   one node, or a root successor reports no last move.
    /// - [`SearchError::NoLegalMoves`] if the root has no successors.
    ///
    /// Both are raised before the engine is modified.
    pub fn get_best_move(&mut self) -> Result<BestMove<T>, SearchError> {
        let candidates = self.root_candidates()?;
        let root = self.frontier.pop().ok_or(SearchError::EmptyFrontier)?;
        let root_state = self.visited.get(root.state_id())?.clone();
        self.stats.expansions += 1;
        self.report_progress(&root);

        let mut best: Option<BestMove<T>> = None;
        for (branch, (candidate, mv)) in candidates.into_iter().enumerate() {
            let h = self.heuristic.estimate(&candidate);
            let id = self.visited.insert(candidate);
            let order = self.next_order();
            self.frontier.push(SearchNode::new(
                id,
                root.path_cost() + 1,
                h,
                Some(mv.clone()),
                order,
            ));
            self.stats.generated += 1;

            let outcome = self.run_branch()?;
            debug!(
                "branch {branch}: ended at depth {} with f-cost {}",
                outcome.path_cost(),
                outcome.f_cost()
            );
            let better = match &best {
                None => true,
                Some(b) => outcome.f_cost() < b.node.f_cost(),
            };
            if better {
                let state = self.visited.get(outcome.state_id())?.clone();
                best = Some(BestMove {
                    mv,
                    node: outcome,
                    state,
                });
            }

            self.reset_to(root_state.clone());
        }
        self.frontier.clear();
        // Branch nodes point into cleared epochs.
        self.best_popped = None;
        best.ok_or(SearchError::NoLegalMoves)
    }

    /// Resolve a node's state handle.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::StaleHandle`] for nodes from before a
    /// `get_best_move` branch reset.
    pub fn state(&self, node: &SearchNode<T>) -> Result<&T, SearchError> {
        self.visited.get(node.state_id())
    }

    /// The node's memoized successors.
    ///
    /// # Errors
    ///
    /// As [`Self::state`].
    pub fn successors<'a>(&self, node: &'a SearchNode<T>) -> Result<&'a [T], SearchError> {
        let state = self.visited.get(node.state_id())?;
        Ok(node.successors(state))
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        if self.frontier.is_empty() {
            EngineStatus::Exhausted
        } else if self.stats.expansions == 0 {
            EngineStatus::Ready
        } else {
            EngineStatus::Expanding
        }
    }

    /// Counters with the frontier high-water mark filled in.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.frontier.high_water(),
            ..self.stats
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Distinct states in the current visited-set epoch.
    #[must_use]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Current visited-set epoch; advances on every branch reset.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.visited.epoch()
    }

    /// Check whether an equal state has been visited in the current epoch.
    #[must_use]
    pub fn is_visited(&self, state: &T) -> bool {
        self.visited.contains(state)
    }

    fn plant_root(&mut self, initial: T) {
        self.visited.seed(self.history.iter().cloned());
        let h = self.heuristic.estimate(&initial);
        let id = self.visited.insert(initial);
        let order = self.next_order();
        self.frontier.push(SearchNode::new(id, 0, h, None, order));
    }

    fn expand(&mut self, next: &SearchNode<T>) -> Result<(), SearchError> {
        let state = self.visited.get(next.state_id())?;
        let successors = next.successors(state);
        trace!(
            "expanding depth {} f-cost {}: {} successors",
            next.path_cost(),
            next.f_cost(),
            successors.len()
        );

        for successor in successors {
            if self.visited.contains(successor) {
                self.stats.duplicates_suppressed += 1;
                continue;
            }
            let initial_move = if next.is_root() {
                successor.last_move()
            } else {
                next.initial_move().cloned()
            };
            let h = self.heuristic.estimate(successor);
            let id = self.visited.insert(successor.clone());
            let order = self.next_order();
            self.frontier
                .push(SearchNode::new(id, next.path_cost() + 1, h, initial_move, order));
            self.stats.generated += 1;
        }
        Ok(())
    }

    /// Check `get_best_move` preconditions without mutating anything and
    /// return the root's successors paired with their moves.
    fn root_candidates(&self) -> Result<Vec<(T, T::Move)>, SearchError> {
        if self.frontier.len() != 1 {
            return Err(SearchError::invalid_state(format!(
                "get_best_move needs exactly one node on the frontier, found {}",
                self.frontier.len()
            )));
        }
        let root = self
            .frontier
            .peek()
            .ok_or_else(|| SearchError::invalid_state("frontier is empty"))?;
        let successors = node_successors(&self.visited, root)?;
        if successors.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        successors
            .iter()
            .map(|s| {
                let mv = s.last_move().ok_or_else(|| {
                    SearchError::invalid_state("root successor reports no last move")
                })?;
                Ok((s.clone(), mv))
            })
            .collect()
    }

    /// Step until a terminal node is popped or the frontier empties.
    fn run_branch(&mut self) -> Result<SearchNode<T>, SearchError> {
        loop {
            let node = self.step()?;
            let terminal = node_successors(&self.visited, &node)?.is_empty();
            if terminal || self.frontier.is_empty() {
                return Ok(node);
            }
        }
    }

    /// Drop the current epoch and replant the root's visited knowledge.
    fn reset_to(&mut self, root_state: T) {
        self.frontier.clear();
        self.visited.clear();
        self.visited.seed(self.history.iter().cloned());
        self.visited.insert(root_state);
    }

    fn track_best(&mut self, node: &SearchNode<T>, first_expansion: bool) {
        if first_expansion {
            self.first_popped = Some(node.clone());
            return;
        }
        let better = match &self.best_popped {
            None => true,
            Some(b) => node.f_cost() < b.f_cost(),
        };
        if better {
            self.best_popped = Some(node.clone());
        }
    }

    fn next_order(&mut self) -> u64 {
        let order = self.next_creation_order;
        self.next_creation_order += 1;
        order
    }

    fn report_progress(&self, node: &SearchNode<T>) {
        let interval = self.policy.progress_interval;
        if interval != 0 && self.stats.expansions % interval == 0 {
            info!(
                "expanded {} nodes: depth {}, f-cost {}, frontier {}, visited {}",
                self.stats.expansions,
                node.path_cost(),
                node.f_cost(),
                self.frontier.len(),
                self.visited.len()
            );
        }
    }
}

fn node_successors<'a, T: SearchState>(
    visited: &VisitedSet<T>,
    node: &'a SearchNode<T>,
) -> Result<&'a [T], SearchError> {
    Ok(node.successors(visited.get(node.state_id())?))
}
