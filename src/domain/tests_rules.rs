//! Rule engine coverage: classification, field legality, suit lock,
//! reversal, and the forbidden-finish table.

use super::cards_types::Card;
use super::rules;
use super::state::{MatchState, Phase, PlayType};
use crate::errors::domain::RuleViolation;

fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|t| t.parse::<Card>().expect("hardcoded valid card token"))
        .collect()
}

fn open_state() -> MatchState {
    let mut state = MatchState::new(3);
    state.phase = Phase::Playing;
    state.round_no = 1;
    state
}

fn contested(field: &[&str], play_type: PlayType) -> MatchState {
    let mut state = open_state();
    state.field = cards(field);
    state.last_play_type = play_type;
    state.last_player = Some(3);
    state
}

fn violation(result: Result<rules::Evaluation, crate::errors::domain::DomainError>) -> RuleViolation {
    result.expect_err("expected a rule violation").kind().clone()
}

#[test]
fn classifies_singles_pairs_and_stairs() {
    assert_eq!(rules::classify(&cards(&["7H"])), Some(PlayType::Single));
    assert_eq!(rules::classify(&cards(&["JK1"])), Some(PlayType::Single));
    assert_eq!(rules::classify(&cards(&["7H", "7C"])), Some(PlayType::Pair));
    assert_eq!(
        rules::classify(&cards(&["7H", "7C", "7D"])),
        Some(PlayType::Pair)
    );
    assert_eq!(
        rules::classify(&cards(&["3S", "4S", "5S"])),
        Some(PlayType::Stairs)
    );
    assert_eq!(rules::classify(&cards(&["7H", "8C"])), None);
    assert_eq!(rules::classify(&[]), None);
}

#[test]
fn jokers_complete_pairs_and_stand_alone_as_pairs() {
    assert_eq!(rules::classify(&cards(&["9D", "JK1"])), Some(PlayType::Pair));
    assert_eq!(
        rules::classify(&cards(&["JK1", "JK2"])),
        Some(PlayType::Pair)
    );
}

#[test]
fn stairs_allow_joker_filled_gaps_up_to_the_joker_count() {
    // One rank missing, one joker: fine.
    assert_eq!(
        rules::classify(&cards(&["3S", "5S", "JK1"])),
        Some(PlayType::Stairs)
    );
    // Two ranks missing, one joker: not a run, and not a pair either.
    assert_eq!(rules::classify(&cards(&["3S", "6S", "JK1"])), None);
    // Joker can also extend a tight run.
    assert_eq!(
        rules::classify(&cards(&["3S", "4S", "5S", "JK2"])),
        Some(PlayType::Stairs)
    );
    // Mixed suits never form stairs.
    assert_eq!(rules::classify(&cards(&["3S", "4H", "5S"])), None);
}

#[test]
fn stairs_sequence_wraps_through_ace_and_two() {
    assert_eq!(
        rules::classify(&cards(&["QS", "KS", "AS"])),
        Some(PlayType::Stairs)
    );
    assert_eq!(
        rules::classify(&cards(&["KH", "AH", "2H"])),
        Some(PlayType::Stairs)
    );
    // Ace and 2 sit at the top; 3 does not follow them.
    assert_eq!(rules::classify(&cards(&["AD", "2D", "3D"])), None);
}

#[test]
fn open_field_accepts_any_recognized_combination() {
    let state = open_state();
    assert!(rules::evaluate(&cards(&["3D"]), &state).is_ok());
    assert!(rules::evaluate(&cards(&["KH", "KC"]), &state).is_ok());
    assert!(rules::evaluate(&cards(&["3S", "4S", "5S"]), &state).is_ok());
    assert_eq!(
        violation(rules::evaluate(&cards(&["3D", "9H"]), &state)),
        RuleViolation::UnknownCombination
    );
    assert_eq!(
        violation(rules::evaluate(&[], &state)),
        RuleViolation::EmptyPlay
    );
}

#[test]
fn singles_beat_by_strict_strength() {
    let state = contested(&["9H"], PlayType::Single);
    assert!(rules::evaluate(&cards(&["TH"]), &state).is_ok());
    assert!(rules::evaluate(&cards(&["2C"]), &state).is_ok());
    assert_eq!(
        violation(rules::evaluate(&cards(&["9C"]), &state)),
        RuleViolation::TooWeak
    );
    assert_eq!(
        violation(rules::evaluate(&cards(&["8D"]), &state)),
        RuleViolation::TooWeak
    );
}

#[test]
fn revolution_inverts_the_beat_direction_for_pairs() {
    let mut state = contested(&["7S", "7H"], PlayType::Pair);
    state.revolution = true;
    assert!(rules::evaluate(&cards(&["5S", "5H"]), &state).is_ok());
    assert_eq!(
        violation(rules::evaluate(&cards(&["9S", "9H"]), &state)),
        RuleViolation::TooWeak
    );
}

#[test]
fn revolution_and_eleven_back_cancel_out() {
    let mut state = contested(&["9H"], PlayType::Single);
    state.revolution = true;
    state.eleven_back = true;
    assert!(!state.effective_reversed());
    assert!(rules::evaluate(&cards(&["TH"]), &state).is_ok());
    assert_eq!(
        violation(rules::evaluate(&cards(&["5D"]), &state)),
        RuleViolation::TooWeak
    );
}

#[test]
fn spade_three_answers_a_lone_joker() {
    let state = contested(&["JK1"], PlayType::Single);
    let eval = rules::evaluate(&cards(&["3S"]), &state).unwrap();
    assert!(eval.special_return);
    // Any other single is simply too weak against the joker.
    assert_eq!(
        violation(rules::evaluate(&cards(&["2C"]), &state)),
        RuleViolation::TooWeak
    );
    assert_eq!(
        violation(rules::evaluate(&cards(&["3H"]), &state)),
        RuleViolation::TooWeak
    );
}

#[test]
fn lone_joker_is_unanswerable_under_reversed_ranking() {
    let mut state = contested(&["JK1"], PlayType::Single);
    state.revolution = true;
    assert_eq!(
        violation(rules::evaluate(&cards(&["3H"]), &state)),
        RuleViolation::CannotBeatLoneJoker
    );
    // The spade 3 return is unaffected by reversal.
    assert!(rules::evaluate(&cards(&["3S"]), &state).unwrap().special_return);
}

#[test]
fn field_size_and_type_must_match() {
    let pair_field = contested(&["5S", "5H"], PlayType::Pair);
    assert_eq!(
        violation(rules::evaluate(&cards(&["9D"]), &pair_field)),
        RuleViolation::SizeMismatch
    );

    let stairs_field = contested(&["3H", "4H", "5H"], PlayType::Stairs);
    assert_eq!(
        violation(rules::evaluate(&cards(&["7S", "7H", "JK1"]), &stairs_field)),
        RuleViolation::TypeMismatch
    );
}

#[test]
fn suit_lock_restricts_pairs_to_the_same_suit_multiset() {
    let mut state = contested(&["5S", "5H"], PlayType::Pair);
    state.bind = true;
    assert!(rules::evaluate(&cards(&["7S", "7H"]), &state).is_ok());
    assert!(rules::evaluate(&cards(&["7H", "7S"]), &state).is_ok());
    assert_eq!(
        violation(rules::evaluate(&cards(&["7D", "7C"]), &state)),
        RuleViolation::SuitLockMismatch
    );
}

#[test]
fn suit_lock_on_stairs_follows_the_leading_suit() {
    let mut state = contested(&["3H", "4H", "5H"], PlayType::Stairs);
    state.bind = true;
    assert!(rules::evaluate(&cards(&["6H", "7H", "8H"]), &state).is_ok());
    assert_eq!(
        violation(rules::evaluate(&cards(&["6S", "7S", "8S"]), &state)),
        RuleViolation::SuitLockMismatch
    );
}

#[test]
fn suits_match_compares_multisets_regardless_of_order() {
    assert!(rules::suits_match(
        &cards(&["5S", "5H"]),
        &cards(&["9H", "9S"])
    ));
    assert!(!rules::suits_match(
        &cards(&["5S", "5H"]),
        &cards(&["9D", "9C"])
    ));
}

#[test]
fn forbidden_finish_table() {
    // Lone joker, any 8, and the top rank of the current ordering.
    assert!(rules::is_forbidden_finish(&cards(&["JK1"]), false));
    assert!(rules::is_forbidden_finish(&cards(&["8H"]), false));
    assert!(rules::is_forbidden_finish(&cards(&["8H"]), true));
    assert!(rules::is_forbidden_finish(&cards(&["2C"]), false));
    assert!(!rules::is_forbidden_finish(&cards(&["2C"]), true));
    assert!(rules::is_forbidden_finish(&cards(&["3D"]), true));
    assert!(!rules::is_forbidden_finish(&cards(&["3D"]), false));
    assert!(!rules::is_forbidden_finish(&cards(&["KH"]), false));

    // Joker-assisted pairs that would amount to the same escape.
    assert!(rules::is_forbidden_finish(&cards(&["JK1", "JK2"]), false));
    assert!(rules::is_forbidden_finish(&cards(&["8S", "JK1"]), false));
    assert!(rules::is_forbidden_finish(&cards(&["2S", "JK1"]), false));
    assert!(!rules::is_forbidden_finish(&cards(&["2S", "JK1"]), true));
    assert!(rules::is_forbidden_finish(&cards(&["3S", "JK1"]), true));
    assert!(!rules::is_forbidden_finish(&cards(&["3S", "JK1"]), false));

    // Natural pairs and longer combinations finish freely.
    assert!(!rules::is_forbidden_finish(&cards(&["4H", "4D"]), false));
    assert!(!rules::is_forbidden_finish(&cards(&["2H", "2D"]), false));
    assert!(!rules::is_forbidden_finish(&cards(&["8S", "8H", "8D"]), false));
}

#[test]
fn evaluate_never_mutates_the_state() {
    let mut state = contested(&["9H"], PlayType::Single);
    state.bind = true;
    let before = state.clone();
    let _ = rules::evaluate(&cards(&["TH"]), &state);
    let _ = rules::evaluate(&cards(&["3D"]), &state);
    assert_eq!(state.field, before.field);
    assert_eq!(state.bind, before.bind);
    assert_eq!(state.turn, before.turn);
    assert_eq!(state.passed, before.passed);
}
