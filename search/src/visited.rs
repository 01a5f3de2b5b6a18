//! Canonical state arena with epoch-checked handles.
//!
//! The visited set is the only owner of searched states. Nodes refer to
//! states through [`StateId`] handles. Clearing the set starts a new epoch,
//! and handles minted in an older epoch are rejected rather than silently
//! resolving to whatever now occupies their slot.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::SearchError;

/// Stable handle to a canonical state inside a [`VisitedSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId {
    epoch: u64,
    index: usize,
}

impl StateId {
    /// The epoch this handle was minted in.
    #[must_use]
    pub fn epoch(self) -> u64 {
        self.epoch
    }

    /// Insertion position within its epoch.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

/// Deduplicating store of every state discovered by a search.
///
/// Each distinct state is stored once; inserting an equal state returns the
/// existing handle and leaves the set unchanged.
#[derive(Debug)]
pub struct VisitedSet<T> {
    states: Vec<Rc<T>>,
    index: HashMap<Rc<T>, usize>,
    epoch: u64,
}

impl<T: Eq + std::hash::Hash> VisitedSet<T> {
    /// Create a new empty set in epoch 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            epoch: 0,
        }
    }

    /// Insert `state` unless an equal state is already stored.
    ///
    /// Returns the handle of the canonical copy either way.
    pub fn insert(&mut self, state: T) -> StateId {
        if let Some(&index) = self.index.get(&state) {
            return self.id(index);
        }
        let index = self.states.len();
        let canonical = Rc::new(state);
        self.index.insert(Rc::clone(&canonical), index);
        self.states.push(canonical);
        self.id(index)
    }

    /// Check whether an equal state has been stored.
    #[must_use]
    pub fn contains(&self, state: &T) -> bool {
        self.index.contains_key(state)
    }

    /// Look up the handle of an equal stored state.
    #[must_use]
    pub fn find(&self, state: &T) -> Option<StateId> {
        self.index.get(state).map(|&index| self.id(index))
    }

    /// Resolve a handle to its canonical state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::StaleHandle`] if the handle predates the last
    /// [`clear`](Self::clear), and [`SearchError::InvalidState`] if the
    /// handle does not belong to this set.
    pub fn get(&self, id: StateId) -> Result<&T, SearchError> {
        if id.epoch != self.epoch {
            return Err(SearchError::StaleHandle {
                handle_epoch: id.epoch,
                current_epoch: self.epoch,
            });
        }
        self.states
            .get(id.index)
            .map(AsRef::as_ref)
            .ok_or_else(|| {
                SearchError::invalid_state(format!(
                    "state handle {} out of range ({} states)",
                    id.index,
                    self.states.len()
                ))
            })
    }

    /// Pre-populate from an existing history. Duplicates collapse.
    pub fn seed<I: IntoIterator<Item = T>>(&mut self, states: I) {
        for state in states {
            self.insert(state);
        }
    }

    /// Drop every stored state and begin a new epoch.
    pub fn clear(&mut self) {
        self.states.clear();
        self.index.clear();
        self.epoch += 1;
    }

    /// Number of distinct states stored in the current epoch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn id(&self, index: usize) -> StateId {
        StateId {
            epoch: self.epoch,
            index,
        }
    }
}

impl<T: Eq + std::hash::Hash> Default for VisitedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
