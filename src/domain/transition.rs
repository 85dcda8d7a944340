//! The match state machine: the only writer of `MatchState`. Each
//! transition validates an intent, mutates the state, and reports what
//! happened as a list of events for the orchestrator to broadcast.

use super::cards_types::{Card, CardId};
use super::deck;
use super::rules;
use super::scoring;
use super::state::{next_eligible_seat, MatchState, Phase, PlayType, SeatIx, SEATS};
use crate::errors::domain::{DomainError, RuleViolation};

/// Table-talk moments the orchestrator announces to every seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announce {
    /// Rank-8 play cleared the field.
    Cut,
    /// Spade 3 answered a lone joker.
    SpecialReturn,
    Revolution,
    ElevenBack,
    /// Everyone else passed; the field is cleared.
    Sweep,
    Foul { seat: SeatIx },
    Finished { seat: SeatIx },
}

/// Outcome of a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_no: u8,
    pub points: [i16; SEATS],
    pub is_final: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Announce(Announce),
    RoundOver(RoundSummary),
}

/// Begin a round: bump the counter, reshuffle, deal, and hand the opening
/// turn to `opener`. Revolution does not carry over between rounds.
pub fn start_round(state: &mut MatchState, seed: u64, opener: SeatIx) {
    state.round_no = state.round_no.saturating_add(1);
    state.phase = Phase::Playing;
    state.revolution = false;
    state.winners.clear();
    state.fouled.clear();
    state.reset_field();
    state.last_player = None;
    state.hands = deck::deal(seed);
    state.turn = opener;
}

fn guard_actionable(state: &MatchState, seat: SeatIx) -> Result<(), DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::validation(
            RuleViolation::PhaseMismatch,
            "No round in progress",
        ));
    }
    if state.turn != seat {
        return Err(DomainError::validation(
            RuleViolation::OutOfTurn,
            "Out of turn",
        ));
    }
    Ok(())
}

/// Resolve selected ids against the seat's hand, preserving selection
/// order. Unknown or duplicate ids are silently dropped.
fn resolve_cards(hand: &[Card], card_ids: &[CardId]) -> Vec<Card> {
    let mut picked: Vec<Card> = Vec::with_capacity(card_ids.len());
    for id in card_ids {
        if picked.iter().any(|c| c.id == *id) {
            continue;
        }
        if let Some(card) = hand.iter().find(|c| c.id == *id) {
            picked.push(*card);
        }
    }
    picked
}

/// Once three seats are done, force the remaining seat into last place,
/// settle the points, and close the round (or the match).
fn check_round_end(state: &mut MatchState, events: &mut Vec<TransitionEvent>) -> bool {
    if state.winners.len() + state.fouled.len() < 3 {
        return false;
    }
    for seat in 0..SEATS as SeatIx {
        if !state.finished(seat) {
            state.winners.push(seat);
        }
    }
    let points = scoring::round_points(&state.winners, &state.fouled);
    for (total, p) in state.scores_total.iter_mut().zip(points.iter()) {
        *total += p;
    }
    let is_final = state.round_no >= state.max_rounds;
    state.phase = if is_final {
        Phase::MatchOver
    } else {
        Phase::RoundOver
    };
    events.push(TransitionEvent::RoundOver(RoundSummary {
        round_no: state.round_no,
        points,
        is_final,
    }));
    true
}

/// Apply a play intent. Validates through the rule engine, handles the
/// forbidden-finish foul, places the cards, applies special effects, and
/// advances the turn.
pub fn apply_play(
    state: &mut MatchState,
    seat: SeatIx,
    card_ids: &[CardId],
) -> Result<Vec<TransitionEvent>, DomainError> {
    guard_actionable(state, seat)?;

    let cards = resolve_cards(&state.hands[seat as usize], card_ids);
    let eval = rules::evaluate(&cards, state)?;

    let mut events = Vec::new();

    // An attempted forbidden finish never lands on the table: the seat is
    // eliminated and the field stays as it was.
    if cards.len() == state.hands[seat as usize].len()
        && rules::is_forbidden_finish(&cards, state.effective_reversed())
    {
        state.fouled.push(seat);
        state.hands[seat as usize].clear();
        events.push(TransitionEvent::Announce(Announce::Foul { seat }));
        if !check_round_end(state, &mut events) {
            state.turn = next_eligible_seat(state, seat);
        }
        return Ok(events);
    }

    // Latch the suit-lock when two consecutive plays share an exact suit
    // multiset. Evaluated against the outgoing field, before replacement.
    if !state.bind && !state.field.is_empty() && rules::suits_match(&cards, &state.field) {
        state.bind = true;
    }

    state.field = cards.clone();
    state.last_play_type = eval.play_type;
    state.last_player = Some(seat);
    state.passed = [false; SEATS];
    state.hands[seat as usize].retain(|c| !cards.iter().any(|p| p.id == c.id));

    let non_stairs = eval.play_type != PlayType::Stairs;
    let mut kept_turn = false;
    if non_stairs && cards.iter().any(|c| c.rank == 8) {
        events.push(TransitionEvent::Announce(Announce::Cut));
        state.reset_field();
        kept_turn = true;
    } else if eval.special_return {
        events.push(TransitionEvent::Announce(Announce::SpecialReturn));
        state.reset_field();
        kept_turn = true;
    } else {
        if cards.len() >= 4 {
            state.revolution = !state.revolution;
            events.push(TransitionEvent::Announce(Announce::Revolution));
        }
        if non_stairs && cards.iter().any(|c| c.rank == 11) {
            state.eleven_back = true;
            events.push(TransitionEvent::Announce(Announce::ElevenBack));
        }
    }

    let emptied = state.hands[seat as usize].is_empty();
    if emptied {
        state.winners.push(seat);
        events.push(TransitionEvent::Announce(Announce::Finished { seat }));
    }

    if !check_round_end(state, &mut events) {
        // A cut or return keeps the turn with the opener, unless the
        // opener just emptied their hand.
        if !(kept_turn && !emptied) {
            state.turn = next_eligible_seat(state, seat);
        }
    }

    Ok(events)
}

/// Apply a pass intent. When every other active seat has passed since the
/// last play, the trick is swept and the turn returns to the last player.
pub fn apply_pass(state: &mut MatchState, seat: SeatIx) -> Result<Vec<TransitionEvent>, DomainError> {
    guard_actionable(state, seat)?;

    state.passed[seat as usize] = true;

    let mut events = Vec::new();
    let active = state.active_seats();
    if active <= 1 {
        check_round_end(state, &mut events);
        return Ok(events);
    }

    if state.passed_count() >= active - 1 {
        events.push(TransitionEvent::Announce(Announce::Sweep));
        state.reset_field();
        state.turn = match state.last_player {
            Some(last) if !state.finished(last) => last,
            Some(last) => next_eligible_seat(state, last),
            None => next_eligible_seat(state, seat),
        };
        state.last_player = None;
    } else {
        state.turn = next_eligible_seat(state, seat);
    }

    Ok(events)
}
