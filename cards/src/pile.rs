//! `CardPile`: an ordered pile of cards with a face-down prefix.
//!
//! The pile stores every card, including the face-down ones, but the
//! positional accessor masks them:
//!
//! - `index < hidden` → [`Card::UNKNOWN`]
//! - `index >= len` → [`Card::EMPTY`]
//! - otherwise the stored card
//!
//! Equality and hashing go through the same mask, so two piles that differ
//! only in their face-down cards are the same pile to a searcher.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::card::Card;

/// Ordered pile, bottom card first.
#[derive(Clone, Default)]
pub struct CardPile {
    cards: Vec<Card>,
    hidden: usize,
}

impl CardPile {
    /// Build a pile from bottom-to-top cards. `hidden` is clamped to the length.
    #[must_use]
    pub fn new(cards: Vec<Card>, hidden: usize) -> Self {
        let hidden = hidden.min(cards.len());
        Self { cards, hidden }
    }

    /// A pile with every card face up.
    #[must_use]
    pub fn face_up(cards: Vec<Card>) -> Self {
        Self::new(cards, 0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of face-down cards at the bottom of the pile.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden
    }

    /// Masked positional access.
    #[must_use]
    pub fn get(&self, index: usize) -> Card {
        if index < self.hidden {
            Card::UNKNOWN
        } else {
            self.cards.get(index).copied().unwrap_or(Card::EMPTY)
        }
    }

    /// The top card as seen by a player; `EMPTY` for an empty pile.
    #[must_use]
    pub fn top(&self) -> Card {
        match self.cards.len() {
            0 => Card::EMPTY,
            n => self.get(n - 1),
        }
    }

    /// A copy of this pile with `card` placed face up on top.
    #[must_use]
    pub fn add_top(&self, card: Card) -> Self {
        let mut cards = Vec::with_capacity(self.cards.len() + 1);
        cards.extend_from_slice(&self.cards);
        cards.push(card);
        Self {
            cards,
            hidden: self.hidden,
        }
    }

    /// A copy of this pile without its top card. An empty pile stays empty.
    #[must_use]
    pub fn remove_top(&self) -> Self {
        let mut cards = self.cards.clone();
        cards.pop();
        Self::new(cards, self.hidden)
    }

    /// A copy of this pile whose top card is face up.
    #[must_use]
    pub fn reveal_top(&self) -> Self {
        let hidden = self.hidden.min(self.cards.len().saturating_sub(1));
        Self {
            cards: self.cards.clone(),
            hidden,
        }
    }

    /// Masked view of every position, bottom first.
    pub fn visible(&self) -> impl Iterator<Item = Card> + '_ {
        (0..self.cards.len()).map(|i| self.get(i))
    }
}

impl PartialEq for CardPile {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.visible().eq(other.visible())
    }
}

impl Eq for CardPile {}

impl Hash for CardPile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for card in self.visible() {
            card.hash(state);
        }
    }
}

impl fmt::Debug for CardPile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.visible()).finish()
    }
}

impl fmt::Display for CardPile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{}", Card::EMPTY);
        }
        for (i, card) in self.visible().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
