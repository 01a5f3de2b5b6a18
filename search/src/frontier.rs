//! Best-first frontier ordered by f-cost.
//!
//! Ties in f-cost are broken by creation order, oldest node first, so the
//! pop sequence is fully determined by the push sequence.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use crate::contract::SearchState;
use crate::node::SearchNode;
use crate::policy::FrontierOrder;

/// The frontier ordering key: `(f_cost, creation_order)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: u32,
    pub creation_order: u64,
}

impl<T: SearchState> From<&SearchNode<T>> for FrontierKey {
    fn from(node: &SearchNode<T>) -> Self {
        Self {
            f_cost: node.f_cost(),
            creation_order: node.creation_order(),
        }
    }
}

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so "greater" here means "pops sooner".
struct FrontierEntry<T: SearchState> {
    key: FrontierKey,
    order: FrontierOrder,
    node: SearchNode<T>,
}

impl<T: SearchState> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T: SearchState> Eq for FrontierEntry<T> {}

impl<T: SearchState> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: SearchState> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_cost = match self.order {
            FrontierOrder::LowestFirst => other.key.f_cost.cmp(&self.key.f_cost),
            FrontierOrder::HighestFirst => self.key.f_cost.cmp(&other.key.f_cost),
        };
        by_cost.then(other.key.creation_order.cmp(&self.key.creation_order))
    }
}

/// Best-first frontier manager.
///
/// Holds nodes only; dedup is the visited set's job, so the same state may
/// transiently appear here more than once.
pub struct Frontier<T: SearchState> {
    heap: BinaryHeap<FrontierEntry<T>>,
    order: FrontierOrder,
    high_water: u64,
}

impl<T: SearchState> fmt::Debug for Frontier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frontier")
            .field("len", &self.heap.len())
            .field("order", &self.order)
            .field("next", &self.heap.peek().map(|e| e.key))
            .field("high_water", &self.high_water)
            .finish()
    }
}

impl<T: SearchState> Frontier<T> {
    /// Create a new empty frontier popping in `order`.
    #[must_use]
    pub fn new(order: FrontierOrder) -> Self {
        Self {
            heap: BinaryHeap::new(),
            order,
            high_water: 0,
        }
    }

    /// Push a node onto the frontier.
    pub fn push(&mut self, node: SearchNode<T>) {
        self.heap.push(FrontierEntry {
            key: FrontierKey::from(&node),
            order: self.order,
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the best node under this frontier's order.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode<T>> {
        self.heap.pop().map(|e| e.node)
    }

    /// The node [`pop`](Self::pop) would return next.
    #[must_use]
    pub fn peek(&self) -> Option<&SearchNode<T>> {
        self.heap.peek().map(|e| &e.node)
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn order(&self) -> FrontierOrder {
        self.order
    }

    /// High-water mark of frontier size. Survives [`clear`](Self::clear).
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Drop every queued node.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
