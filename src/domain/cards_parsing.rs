//! Compact card tokens ("3S", "TH", "JK1") used by tests and fixtures.

use std::str::FromStr;

use super::cards_types::{Card, Suit};
use crate::errors::domain::{DomainError, RuleViolation};

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JK1" => return Ok(Card::joker(0)),
            "JK2" => return Ok(Card::joker(1)),
            _ => {}
        }

        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(DomainError::validation(
                RuleViolation::Other("BAD_CARD_TOKEN".into()),
                format!("Invalid card token: {s}"),
            ));
        };

        let rank = match rank_ch {
            'A' => 1,
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            '2'..='9' => rank_ch as u8 - b'0',
            _ => {
                return Err(DomainError::validation(
                    RuleViolation::Other("BAD_CARD_TOKEN".into()),
                    format!("Invalid rank character: {rank_ch}"),
                ))
            }
        };

        let suit = match suit_ch {
            'S' => Suit::Spades,
            'H' => Suit::Hearts,
            'D' => Suit::Diamonds,
            'C' => Suit::Clubs,
            _ => {
                return Err(DomainError::validation(
                    RuleViolation::Other("BAD_CARD_TOKEN".into()),
                    format!("Invalid suit character: {suit_ch}"),
                ))
            }
        };

        Ok(Card::suited(suit, rank))
    }
}
