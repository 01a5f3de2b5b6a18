//! World implementations for tests and benchmarks.

pub mod graph;
pub mod patience;
