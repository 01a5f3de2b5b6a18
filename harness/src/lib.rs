//! Lookahead Harness: concrete worlds for driving the search engine.
//!
//! The engine is domain-agnostic; tests and benchmarks need states. Worlds
//! here implement [`lookahead_search::SearchState`] and nothing more. They
//! carry no presentation layer.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod worlds;
