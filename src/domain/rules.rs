//! The rule engine: combination classification, legality against the field,
//! strength comparison, and the forbidden-finish check. Pure reads only;
//! the single source of truth for "is this move legal".

use super::cards_types::{Card, Suit, STRENGTH_JOKER, STRENGTH_LONE_JOKER};
use super::state::{MatchState, PlayType};
use crate::errors::domain::{DomainError, RuleViolation};

/// Result of evaluating a candidate play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub play_type: PlayType,
    /// The spade-3 answer to a lone joker; always legal, clears the field.
    pub special_return: bool,
}

/// Rank ordinal used only for stairs adjacency: Ace and 2 follow the King
/// (3,4,...,K,A,2).
fn stairs_ordinal(rank: u8) -> u8 {
    if (1..=2).contains(&rank) {
        rank + 13
    } else {
        rank
    }
}

/// Classify a selection independent of the field. None means it is no
/// recognizable combination.
pub fn classify(cards: &[Card]) -> Option<PlayType> {
    if cards.is_empty() {
        return None;
    }
    let jokers = cards.iter().filter(|c| c.is_joker()).count();
    let normals: Vec<&Card> = cards.iter().filter(|c| !c.is_joker()).collect();

    // Jokers are wildcards completing a rank group; all-joker selections
    // are trivially pair-compatible.
    let pair_ok = normals.iter().all(|c| c.rank == normals[0].rank);

    let mut stairs_ok = false;
    if cards.len() >= 3 {
        let same_suit = normals.windows(2).all(|w| w[0].suit == w[1].suit);
        if same_suit {
            if normals.is_empty() {
                stairs_ok = true;
            } else {
                let mut ordinals: Vec<u8> =
                    normals.iter().map(|c| stairs_ordinal(c.rank)).collect();
                ordinals.sort_unstable();
                let mut gap: i32 = 0;
                for w in ordinals.windows(2) {
                    gap += w[1] as i32 - w[0] as i32 - 1;
                }
                stairs_ok = gap >= 0 && gap <= jokers as i32;
            }
        }
    }

    if stairs_ok {
        Some(PlayType::Stairs)
    } else if pair_ok {
        Some(if cards.len() == 1 {
            PlayType::Single
        } else {
            PlayType::Pair
        })
    } else {
        None
    }
}

/// Representative strength of a combination for beat comparison.
///
/// Stairs compare by their lowest card. Singles and pairs compare by the
/// first non-joker card (jokers assume the rank they complete), falling
/// back to the joker strength when every card is a joker. A joker played
/// alone is the one unbeatable single.
pub fn combo_strength(cards: &[Card], play_type: PlayType) -> u8 {
    if cards.len() == 1 && cards[0].is_joker() {
        return STRENGTH_LONE_JOKER;
    }
    if play_type == PlayType::Stairs {
        return cards.iter().map(|c| c.strength).min().unwrap_or(STRENGTH_JOKER);
    }
    cards
        .iter()
        .find(|c| !c.is_joker())
        .map(|c| c.strength)
        .unwrap_or(STRENGTH_JOKER)
}

fn suit_multiset(cards: &[Card]) -> Vec<u8> {
    let mut suits: Vec<u8> = cards.iter().map(|c| c.suit.ordinal()).collect();
    suits.sort_unstable();
    suits
}

/// Do two same-length plays lock suits against each other?
pub fn suits_match(a: &[Card], b: &[Card]) -> bool {
    suit_multiset(a) == suit_multiset(b)
}

/// The pure legality predicate: classify `cards` and, when the field is
/// non-empty, check size, type, suit-lock and strength against it.
pub fn evaluate(cards: &[Card], state: &MatchState) -> Result<Evaluation, DomainError> {
    if cards.is_empty() {
        return Err(DomainError::validation(
            RuleViolation::EmptyPlay,
            "No cards selected",
        ));
    }

    let Some(play_type) = classify(cards) else {
        return Err(DomainError::validation(
            RuleViolation::UnknownCombination,
            "Not a single, pair, or stairs",
        ));
    };

    if state.field.is_empty() {
        return Ok(Evaluation {
            play_type,
            special_return: false,
        });
    }

    // Lone joker on the table: the spade 3 answers it unconditionally;
    // under reversed ranking nothing else can, since the joker is already
    // the logical weakest card.
    if state.field.len() == 1 && state.field[0].is_joker() {
        if cards.len() == 1 && cards[0].suit == Suit::Spades && cards[0].rank == 3 {
            return Ok(Evaluation {
                play_type: PlayType::Single,
                special_return: true,
            });
        }
        if state.effective_reversed() {
            return Err(DomainError::validation(
                RuleViolation::CannotBeatLoneJoker,
                "Nothing beats a lone joker under reversed ranking",
            ));
        }
    }

    if cards.len() != state.field.len() {
        return Err(DomainError::validation(
            RuleViolation::SizeMismatch,
            format!("Field requires {} cards", state.field.len()),
        ));
    }
    if play_type != state.last_play_type {
        return Err(DomainError::validation(
            RuleViolation::TypeMismatch,
            "Combination type does not match the field",
        ));
    }

    if state.bind {
        let locked = match play_type {
            // Stairs lock on the leading suit; a joker on either lead
            // escapes the lock.
            PlayType::Stairs => {
                state.field[0].suit == cards[0].suit
                    || state.field[0].is_joker()
                    || cards[0].is_joker()
            }
            _ => suits_match(cards, &state.field),
        };
        if !locked {
            return Err(DomainError::validation(
                RuleViolation::SuitLockMismatch,
                "Suit lock is in force",
            ));
        }
    }

    let field_strength = combo_strength(&state.field, state.last_play_type);
    let play_strength = combo_strength(cards, play_type);
    let beats = if state.effective_reversed() {
        play_strength < field_strength
    } else {
        play_strength > field_strength
    };
    if !beats {
        return Err(DomainError::validation(
            RuleViolation::TooWeak,
            "Play does not beat the field",
        ));
    }

    Ok(Evaluation {
        play_type,
        special_return: false,
    })
}

/// Combinations that may not be used to empty one's hand. Attempting one
/// converts the seat's outcome to a foul instead of a win.
pub fn is_forbidden_finish(cards: &[Card], reversed: bool) -> bool {
    if cards.len() > 1 {
        if cards.len() == 2 {
            let jokers = cards.iter().filter(|c| c.is_joker()).count();
            if jokers == 2 {
                return true;
            }
            if jokers == 1 {
                // One joker plus a cut card or the top rank of the
                // current ordering.
                if let Some(other) = cards.iter().find(|c| !c.is_joker()) {
                    if other.rank == 8 {
                        return true;
                    }
                    if !reversed && other.rank == 2 {
                        return true;
                    }
                    if reversed && other.rank == 3 {
                        return true;
                    }
                }
            }
        }
        return false;
    }
    let c = &cards[0];
    if c.is_joker() || c.rank == 8 {
        return true;
    }
    (!reversed && c.rank == 2) || (reversed && c.rank == 3)
}
