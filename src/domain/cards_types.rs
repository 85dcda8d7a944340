//! Core card types: Suit, Card, CardId and the strength ordinal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rank value reserved for jokers.
pub const JOKER_RANK: u8 = 0;
/// Strength carried by a joker card (above every suited card).
pub const STRENGTH_JOKER: u8 = 13;
/// Strength of a joker played alone as a single; beats everything,
/// including an all-joker pair on the field.
pub const STRENGTH_LONE_JOKER: u8 = 14;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
    /// Sentinel suit carried by the two jokers.
    Joker,
}

impl Suit {
    pub fn ordinal(self) -> u8 {
        match self {
            Suit::Spades => 0,
            Suit::Hearts => 1,
            Suit::Diamonds => 2,
            Suit::Clubs => 3,
            Suit::Joker => 4,
        }
    }
}

/// Stable identity of one card within a deck. Clients select cards by id;
/// the value is the card's position in the unshuffled deck enumeration.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

/// Maps a rank to its comparison ordinal: 3 is weakest (0), then 4..King,
/// then Ace (11) and 2 (12). Jokers sit above all suited cards.
pub fn strength_for_rank(rank: u8) -> u8 {
    match rank {
        JOKER_RANK => STRENGTH_JOKER,
        1 => 11,
        2 => 12,
        n => n - 3,
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    /// 1..=13 for suited cards, 0 for jokers.
    pub rank: u8,
    /// Precomputed `strength_for_rank(rank)`.
    pub strength: u8,
}

impl Card {
    /// A suited card. `rank` must be 1..=13.
    pub fn suited(suit: Suit, rank: u8) -> Self {
        debug_assert!(suit != Suit::Joker);
        debug_assert!((1..=13).contains(&rank));
        Self {
            id: CardId(suit.ordinal() * 13 + (rank - 1)),
            suit,
            rank,
            strength: strength_for_rank(rank),
        }
    }

    /// One of the two jokers (`n` is 0 or 1).
    pub fn joker(n: u8) -> Self {
        debug_assert!(n < 2);
        Self {
            id: CardId(52 + n),
            suit: Suit::Joker,
            rank: JOKER_RANK,
            strength: STRENGTH_JOKER,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }
}

// Note: Ord on Card is display order only (ascending strength, then suit).
// Gameplay comparisons go through rules::combo_strength, which accounts for
// lone jokers and reversal.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.strength.cmp(&other.strength) {
            std::cmp::Ordering::Equal => self.suit.ordinal().cmp(&other.suit.ordinal()),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Suit serde (compact marks, "JK" for the joker sentinel)
impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Suit::Spades => "S",
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
            Suit::Joker => "JK",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "S" => Ok(Suit::Spades),
            "H" => Ok(Suit::Hearts),
            "D" => Ok(Suit::Diamonds),
            "C" => Ok(Suit::Clubs),
            "JK" => Ok(Suit::Joker),
            _ => Err(serde::de::Error::custom(format!("Invalid suit: {s}"))),
        }
    }
}
