//! `PatienceState`: a small single-player card world.
//!
//! A tableau of [`CardPile`]s is cleared onto four suit foundations. Each
//! move takes the top card of a pile and either
//!
//! - plays it to its suit's foundation, when it is the next rank up, or
//! - places it on an empty pile (only when that uncovers something), or on a
//!   known card one rank higher of the opposite colour.
//!
//! Taking a card flips the newly exposed top card face up. The game is won
//! when every foundation has reached the target rank.
//!
//! Face-down cards are stored but masked by the piles' accessors, so two
//! deals that differ only underneath are the same state to the engine.

use std::fmt;
use std::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use lookahead_cards::{Card, CardPile, Rank, Suit};
use lookahead_search::SearchState;

/// A single card move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatienceMove {
    /// Top of pile `from` to its foundation.
    ToFoundation { from: usize },
    /// Top of pile `from` onto pile `to`.
    ToTableau { from: usize, to: usize },
}

/// A patience position. Equality ignores how the position was reached.
#[derive(Clone)]
pub struct PatienceState {
    tableau: Vec<CardPile>,
    foundations: [Rank; 4],
    target: Rank,
    last: Option<PatienceMove>,
}

impl PatienceState {
    /// Start a game from explicit piles. Foundations start empty.
    #[must_use]
    pub fn deal(tableau: Vec<CardPile>, target: Rank) -> Self {
        Self {
            tableau,
            foundations: [Rank::Unknown; 4],
            target,
            last: None,
        }
    }

    /// Shuffle every card from ace to `target` in all four suits and deal
    /// them round-robin into `piles` piles, all but each top card face down.
    ///
    /// The same `seed` always produces the same deal.
    #[must_use]
    pub fn shuffled(piles: usize, target: Rank, seed: u64) -> Self {
        let mut deck: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| {
                (Rank::Ace.value()..=target.value())
                    .filter_map(Rank::from_u8)
                    .filter(|rank| rank.is_playing_rank())
                    .map(move |rank| Card::new(rank, suit))
            })
            .collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);

        let piles = piles.max(1);
        let mut columns: Vec<Vec<Card>> = vec![Vec::new(); piles];
        for (i, card) in deck.into_iter().enumerate() {
            columns[i % piles].push(card);
        }
        let tableau = columns
            .into_iter()
            .map(|cards| {
                let hidden = cards.len().saturating_sub(1);
                CardPile::new(cards, hidden)
            })
            .collect();
        Self::deal(tableau, target)
    }

    #[must_use]
    pub fn tableau(&self) -> &[CardPile] {
        &self.tableau
    }

    /// Highest rank played to `suit`'s foundation (`Unknown` when none).
    #[must_use]
    pub fn foundation(&self, suit: Suit) -> Rank {
        self.foundations[suit.index()]
    }

    #[must_use]
    pub fn target(&self) -> Rank {
        self.target
    }

    /// Cards still on the tableau.
    #[must_use]
    pub fn cards_remaining(&self) -> u32 {
        let total: usize = self.tableau.iter().map(CardPile::len).sum();
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Heuristic: every remaining card needs at least one move.
    #[must_use]
    pub fn remaining_heuristic(state: &Self) -> u32 {
        state.cards_remaining()
    }

    fn take_top(&self, from: usize, mv: PatienceMove) -> Self {
        let mut next = self.clone();
        next.tableau[from] = self.tableau[from].remove_top().reveal_top();
        next.last = Some(mv);
        next
    }

    fn accepts_on_foundation(&self, card: Card) -> bool {
        let played = self.foundations[card.suit().index()].value();
        card.rank().value() == played + 1 && card.rank() <= self.target
    }

    fn accepts_on_pile(&self, card: Card, from: usize, to: usize) -> bool {
        let dest = &self.tableau[to];
        if dest.is_empty() {
            return self.tableau[from].len() > 1;
        }
        let below = dest.top();
        below.is_known()
            && below.rank().value() == card.rank().value() + 1
            && below.suit().is_red() != card.suit().is_red()
    }
}

impl PartialEq for PatienceState {
    fn eq(&self, other: &Self) -> bool {
        self.foundations == other.foundations
            && self.target == other.target
            && self.tableau == other.tableau
    }
}

impl Eq for PatienceState {}

impl Hash for PatienceState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.foundations.hash(state);
        self.target.hash(state);
        self.tableau.hash(state);
    }
}

impl SearchState for PatienceState {
    type Move = PatienceMove;

    fn successors(&self) -> Vec<Self> {
        let mut out = Vec::new();
        for from in 0..self.tableau.len() {
            let card = self.tableau[from].top();
            if !card.is_known() {
                continue;
            }
            if self.accepts_on_foundation(card) {
                let mv = PatienceMove::ToFoundation { from };
                let mut next = self.take_top(from, mv);
                next.foundations[card.suit().index()] = card.rank();
                out.push(next);
            }
            for to in 0..self.tableau.len() {
                if to == from || !self.accepts_on_pile(card, from, to) {
                    continue;
                }
                let mv = PatienceMove::ToTableau { from, to };
                let mut next = self.take_top(from, mv);
                next.tableau[to] = self.tableau[to].add_top(card);
                out.push(next);
            }
        }
        out
    }

    fn is_win(&self) -> bool {
        self.foundations.iter().all(|&r| r == self.target)
    }

    fn last_move(&self) -> Option<PatienceMove> {
        self.last
    }
}

impl fmt::Debug for PatienceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatienceState({self})")
    }
}

impl fmt::Display for PatienceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (suit, rank) in Suit::ALL.iter().zip(self.foundations) {
            let top = if rank.is_playing_rank() {
                Card::new(rank, *suit)
            } else {
                Card::EMPTY
            };
            write!(f, "{top} ")?;
        }
        f.write_str("|")?;
        for pile in &self.tableau {
            write!(f, " [{pile}]")?;
        }
        Ok(())
    }
}
