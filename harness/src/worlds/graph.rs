//! `GraphWorld`: an explicit, hand-built state graph.
//!
//! Nodes are named, edges are ordered, and every node carries a heuristic
//! value from a lookup table. Because the whole space is spelled out, tests
//! can pin exact expansion orders, costs, and branch outcomes.
//!
//! Successor generation is counted per node so memoization is observable.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use lookahead_search::SearchState;

/// An edge taken between two graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphMove {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Default)]
struct Graph {
    names: Vec<String>,
    edges: Vec<Vec<usize>>,
    wins: Vec<bool>,
    heuristic: Vec<u32>,
    successor_calls: Vec<Cell<usize>>,
}

/// Builder for a [`GraphWorld`]. Nodes are created on first mention.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    index: HashMap<String, usize>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (no-op if it already exists).
    #[must_use]
    pub fn node(mut self, name: &str) -> Self {
        self.intern(name);
        self
    }

    /// Add a directed edge. Successors are generated in edge-insertion order.
    #[must_use]
    pub fn edge(mut self, from: &str, to: &str) -> Self {
        let from = self.intern(from);
        let to = self.intern(to);
        self.graph.edges[from].push(to);
        self
    }

    /// Mark a node as a goal.
    #[must_use]
    pub fn win(mut self, name: &str) -> Self {
        let i = self.intern(name);
        self.graph.wins[i] = true;
        self
    }

    /// Set a node's heuristic value (default 0).
    #[must_use]
    pub fn h(mut self, name: &str, value: u32) -> Self {
        let i = self.intern(name);
        self.graph.heuristic[i] = value;
        self
    }

    #[must_use]
    pub fn build(self) -> GraphWorld {
        GraphWorld {
            graph: Rc::new(self.graph),
            index: self.index,
        }
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.graph.names.len();
        self.graph.names.push(name.to_string());
        self.graph.edges.push(Vec::new());
        self.graph.wins.push(false);
        self.graph.heuristic.push(0);
        self.graph.successor_calls.push(Cell::new(0));
        self.index.insert(name.to_string(), i);
        i
    }
}

/// A built graph. Cheap to clone; clones share the graph and its counters.
#[derive(Debug, Clone)]
pub struct GraphWorld {
    graph: Rc<Graph>,
    index: HashMap<String, usize>,
}

impl GraphWorld {
    /// A `width` x `height` grid with 4-neighbour moves, the goal in the far
    /// corner, and Manhattan distance as heuristic. Node names are `"x,y"`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn grid(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be nonzero");
        let name = |x: u32, y: u32| format!("{x},{y}");
        let mut builder = GraphBuilder::new();
        for y in 0..height {
            for x in 0..width {
                let here = name(x, y);
                builder = builder.h(&here, (width - 1 - x) + (height - 1 - y));
                if x + 1 < width {
                    builder = builder.edge(&here, &name(x + 1, y));
                }
                if y + 1 < height {
                    builder = builder.edge(&here, &name(x, y + 1));
                }
                if x > 0 {
                    builder = builder.edge(&here, &name(x - 1, y));
                }
                if y > 0 {
                    builder = builder.edge(&here, &name(x, y - 1));
                }
            }
        }
        builder.win(&name(width - 1, height - 1)).build()
    }

    /// A root state at the named node.
    ///
    /// # Panics
    ///
    /// Panics if no node has that name.
    #[must_use]
    pub fn state(&self, name: &str) -> GraphState {
        let node = self.lookup(name);
        GraphState {
            graph: Rc::clone(&self.graph),
            node,
            last: None,
        }
    }

    /// Heuristic closure reading this graph's table.
    pub fn heuristic(&self) -> impl Fn(&GraphState) -> u32 {
        let graph = Rc::clone(&self.graph);
        move |s: &GraphState| graph.heuristic[s.node]
    }

    /// How many times the named node has generated its successors.
    ///
    /// # Panics
    ///
    /// Panics if no node has that name.
    #[must_use]
    pub fn successor_calls(&self, name: &str) -> usize {
        self.graph.successor_calls[self.lookup(name)].get()
    }

    /// Total successor generations across all nodes.
    #[must_use]
    pub fn total_successor_calls(&self) -> usize {
        self.graph.successor_calls.iter().map(Cell::get).sum()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.names.len()
    }

    /// The named node's index, as used in [`GraphMove`].
    ///
    /// # Panics
    ///
    /// Panics if no node has that name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> usize {
        match self.index.get(name) {
            Some(&i) => i,
            None => panic!("unknown graph node `{name}`"),
        }
    }

    /// Name of the node at `index`.
    #[must_use]
    pub fn name(&self, index: usize) -> &str {
        &self.graph.names[index]
    }
}

/// A position in a [`GraphWorld`]. Equality and hashing use the node only.
#[derive(Clone)]
pub struct GraphState {
    graph: Rc<Graph>,
    node: usize,
    last: Option<GraphMove>,
}

impl GraphState {
    #[must_use]
    pub fn node(&self) -> usize {
        self.node
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.graph.names[self.node]
    }
}

impl PartialEq for GraphState {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for GraphState {}

impl Hash for GraphState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl fmt::Debug for GraphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphState({})", self.name())
    }
}

impl SearchState for GraphState {
    type Move = GraphMove;

    fn successors(&self) -> Vec<Self> {
        let calls = &self.graph.successor_calls[self.node];
        calls.set(calls.get() + 1);
        self.graph.edges[self.node]
            .iter()
            .map(|&to| Self {
                graph: Rc::clone(&self.graph),
                node: to,
                last: Some(GraphMove {
                    from: self.node,
                    to,
                }),
            })
            .collect()
    }

    fn is_win(&self) -> bool {
        self.graph.wins[self.node]
    }

    fn last_move(&self) -> Option<GraphMove> {
        self.last
    }
}
