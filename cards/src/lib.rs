//! Lookahead Cards: value types for card-game states.
//!
//! Searchable card worlds build their states from these types. Everything here
//! is a plain value: cards are packed bytes, piles are growable vectors, and
//! the "unknown" and "empty" markers are constants compared by value.
//!
//! # Key types
//!
//! - [`Card`]: a packed rank/suit byte with masked-equality semantics
//! - [`CardPile`]: an ordered pile with a hidden prefix

#![forbid(unsafe_code)]

pub mod card;
pub mod pile;

pub use card::{Card, CardParseError, Rank, Suit};
pub use pile::CardPile;
