//! MinForce, the baseline heuristic bot.
//!
//! Enumerates candidate plays from its hand, keeps only those the rule
//! engine accepts against the current field, and spends the least force
//! that wins: the weakest legal candidate under normal ranking, the
//! strongest under effective-reversed ranking. Stairs fields are always
//! passed on (a deliberate scope limit of the heuristic, not a rule).

use std::collections::BTreeMap;

use crate::ai::{BotError, BotMove, BotPlayer};
use crate::domain::rules;
use crate::domain::state::{MatchState, PlayType, SeatIx};
use crate::domain::Card;

#[derive(Clone, Copy, Default)]
pub struct MinForce;

impl MinForce {
    pub const NAME: &'static str = "MinForce";

    /// Non-joker cards grouped by rank, in hand (ascending) order.
    fn rank_groups(hand: &[Card]) -> BTreeMap<u8, Vec<Card>> {
        let mut groups: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
        for card in hand.iter().filter(|c| !c.is_joker()) {
            groups.entry(card.rank).or_default().push(*card);
        }
        groups
    }

    /// Candidate plays when the table is open: every singleton (lone
    /// jokers included) and every full rank group of 2+.
    fn open_candidates(hand: &[Card]) -> Vec<Vec<Card>> {
        let mut candidates: Vec<Vec<Card>> = hand.iter().map(|c| vec![*c]).collect();
        for group in Self::rank_groups(hand).values() {
            if group.len() >= 2 {
                candidates.push(group.clone());
            }
        }
        candidates
    }

    /// Candidate plays against a contested field, restricted to the
    /// field's size and type. Jokers pad incomplete rank groups.
    fn contested_candidates(hand: &[Card], state: &MatchState) -> Vec<Vec<Card>> {
        let size = state.field.len();
        let jokers: Vec<Card> = hand.iter().filter(|c| c.is_joker()).copied().collect();
        let mut candidates = Vec::new();
        match state.last_play_type {
            PlayType::Single => {
                candidates.extend(hand.iter().map(|c| vec![*c]));
            }
            PlayType::Pair => {
                for group in Self::rank_groups(hand).values() {
                    if group.len() >= size {
                        candidates.push(group[..size].to_vec());
                    } else if group.len() + jokers.len() >= size {
                        let mut padded = group.clone();
                        padded.extend(jokers.iter().take(size - group.len()).copied());
                        candidates.push(padded);
                    }
                }
                if jokers.len() >= size {
                    candidates.push(jokers[..size].to_vec());
                }
            }
            PlayType::Stairs => {}
        }
        candidates
    }

    /// Minimum-necessary-force pick among legal candidates.
    fn pick(state: &MatchState, candidates: Vec<Vec<Card>>) -> Option<Vec<Card>> {
        let reversed = state.effective_reversed();
        let mut best: Option<(u8, Vec<Card>)> = None;
        for cand in candidates {
            let Ok(eval) = rules::evaluate(&cand, state) else {
                continue;
            };
            let strength = rules::combo_strength(&cand, eval.play_type);
            let better = match &best {
                None => true,
                Some((s, _)) => {
                    if reversed {
                        strength > *s
                    } else {
                        strength < *s
                    }
                }
            };
            if better {
                best = Some((strength, cand));
            }
        }
        best.map(|(_, cards)| cards)
    }
}

impl BotPlayer for MinForce {
    fn choose(&self, state: &MatchState, seat: SeatIx) -> Result<BotMove, BotError> {
        let Some(hand) = state.hands.get(seat as usize) else {
            return Err(BotError::Internal(format!("no hand at seat {seat}")));
        };
        if hand.is_empty() {
            return Ok(BotMove::Pass);
        }

        let candidates = if state.field.is_empty() {
            Self::open_candidates(hand)
        } else {
            Self::contested_candidates(hand, state)
        };

        match Self::pick(state, candidates) {
            Some(cards) => Ok(BotMove::Play(cards.into_iter().map(|c| c.id).collect())),
            None => Ok(BotMove::Pass),
        }
    }
}
