//! `Card`: one playing card packed into a byte.
//!
//! # Layout
//!
//! | Bits | Field  |
//! |------|--------|
//! | 0-1  | suit   |
//! | 2-7  | rank   |
//!
//! # Sentinels
//!
//! | Name      | Rank      | Byte   |
//! |-----------|-----------|--------|
//! | `UNKNOWN` | `Unknown` | `0x00` |
//! | `EMPTY`   | `Empty`   | `0x38` |
//!
//! Sentinels carry no suit information. Two cards compare equal when their
//! ranks match and, for known cards only, their suits match too.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Card suit (2 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    /// All suits in foundation order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Decode the low two bits of a byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Spades,
            1 => Self::Hearts,
            2 => Self::Diamonds,
            _ => Self::Clubs,
        }
    }

    /// Foundation slot for this suit.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Hearts | Self::Diamonds)
    }

    const fn letter(self) -> char {
        match self {
            Self::Spades => 'S',
            Self::Hearts => 'H',
            Self::Diamonds => 'D',
            Self::Clubs => 'C',
        }
    }
}

/// Card rank, including the two sentinel ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Unknown = 0,
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Empty = 14,
}

impl Rank {
    /// Convert from a raw value. Returns `None` above `Empty`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        let rank = match value {
            0 => Self::Unknown,
            1 => Self::Ace,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            5 => Self::Five,
            6 => Self::Six,
            7 => Self::Seven,
            8 => Self::Eight,
            9 => Self::Nine,
            10 => Self::Ten,
            11 => Self::Jack,
            12 => Self::Queen,
            13 => Self::King,
            14 => Self::Empty,
            _ => return None,
        };
        Some(rank)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// True for `Ace..=King`.
    #[must_use]
    pub const fn is_playing_rank(self) -> bool {
        !matches!(self, Self::Unknown | Self::Empty)
    }
}

/// A playing card packed as `rank << 2 | suit`.
#[derive(Clone, Copy)]
pub struct Card(u8);

impl Card {
    /// Marker for a card whose face is not visible.
    pub const UNKNOWN: Self = Self(0);

    /// Marker for a position past the end of a pile.
    pub const EMPTY: Self = Self::new(Rank::Empty, Suit::Spades);

    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self((rank.value() << 2) | suit as u8)
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        match Rank::from_u8(self.0 >> 2) {
            Some(rank) => rank,
            None => Rank::Unknown,
        }
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        Suit::from_bits(self.0)
    }

    /// True unless this card is one of the sentinels.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.rank().is_playing_rank()
    }

    /// Raw packed byte.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.0
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank() && (!self.is_known() || self.suit() == other.suit())
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        if self.is_known() {
            self.suit().hash(state);
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self} / 0x{:02x})", self.0)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank() {
            Rank::Unknown => return f.write_str("[]"),
            Rank::Empty => return f.write_str("--"),
            Rank::Ace => f.write_str("A")?,
            Rank::Jack => f.write_str("J")?,
            Rank::Queen => f.write_str("Q")?,
            Rank::King => f.write_str("K")?,
            other => write!(f, "{}", other.value())?,
        }
        write!(f, "{}", self.suit().letter())
    }
}

/// Failure to parse a card from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardParseError {
    #[error("card text is empty")]
    Empty,
    #[error("unknown rank `{0}`")]
    BadRank(String),
    #[error("unknown suit `{0}`")]
    BadSuit(char),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parses the `Display` form: `"[]"`, `"--"`, or rank then suit letter
    /// (`"AS"`, `"10H"`, `"QD"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => return Err(CardParseError::Empty),
            "[]" => return Ok(Self::UNKNOWN),
            "--" => return Ok(Self::EMPTY),
            _ => {}
        }
        let mut chars = s.chars();
        let suit_char = chars.next_back().ok_or(CardParseError::Empty)?;
        let suit = match suit_char.to_ascii_uppercase() {
            'S' => Suit::Spades,
            'H' => Suit::Hearts,
            'D' => Suit::Diamonds,
            'C' => Suit::Clubs,
            other => return Err(CardParseError::BadSuit(other)),
        };
        let rank_text = chars.as_str();
        let rank = match rank_text.to_ascii_uppercase().as_str() {
            "A" => Rank::Ace,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            digits => digits
                .parse::<u8>()
                .ok()
                .and_then(Rank::from_u8)
                .filter(|r| r.is_playing_rank())
                .ok_or_else(|| CardParseError::BadRank(rank_text.to_string()))?,
        };
        Ok(Self::new(rank, suit))
    }
}
