//! Per-seat view of a match. `my_hand` is seat-private; everything else is
//! table-public.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::state::{MatchState, SeatIx, SEATS};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub revolution: bool,
    pub eleven_back: bool,
    pub bind: bool,
    pub round: u8,
    pub max_rounds: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub my_hand: Vec<Card>,
    pub field: Vec<Card>,
    pub turn: SeatIx,
    pub hand_counts: [u8; SEATS],
    pub names: [String; SEATS],
    pub scores: [i16; SEATS],
    pub modifiers: Modifiers,
    pub winners: Vec<SeatIx>,
    pub fouled: Vec<SeatIx>,
    pub last_player: Option<SeatIx>,
}

/// Build the view for one seat. Only that seat's cards are included;
/// opponents are reduced to hand counts.
pub fn snapshot_for(state: &MatchState, names: &[String; SEATS], seat: SeatIx) -> StateSnapshot {
    let mut hand_counts = [0u8; SEATS];
    for (count, hand) in hand_counts.iter_mut().zip(state.hands.iter()) {
        *count = hand.len() as u8;
    }
    StateSnapshot {
        my_hand: state.hands[seat as usize].clone(),
        field: state.field.clone(),
        turn: state.turn,
        hand_counts,
        names: names.clone(),
        scores: state.scores_total,
        modifiers: Modifiers {
            revolution: state.revolution,
            eleven_back: state.eleven_back,
            bind: state.bind,
            round: state.round_no,
            max_rounds: state.max_rounds,
        },
        winners: state.winners.clone(),
        fouled: state.fouled.clone(),
        last_player: state.last_player,
    }
}
