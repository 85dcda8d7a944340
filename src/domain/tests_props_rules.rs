//! Property tests for the rule engine and the deal.

use proptest::prelude::*;

use super::cards_types::{Card, Suit};
use super::deck;
use super::rules;
use super::state::{MatchState, Phase, PlayType, SEATS};

fn suit(ix: u8) -> Suit {
    match ix {
        0 => Suit::Spades,
        1 => Suit::Hearts,
        2 => Suit::Diamonds,
        _ => Suit::Clubs,
    }
}

fn single_field(card: Card, reversed: bool) -> MatchState {
    let mut state = MatchState::new(3);
    state.phase = Phase::Playing;
    state.round_no = 1;
    state.field = vec![card];
    state.last_play_type = PlayType::Single;
    state.last_player = Some(3);
    state.revolution = reversed;
    state
}

proptest! {
    /// A one-joker, three-card run is stairs exactly when the joker can
    /// bridge the hole between the two suited cards.
    #[test]
    fn stairs_with_one_joker_bridge_at_most_one_missing_rank(
        start in 3u8..=9,
        gap in 0u8..=3,
    ) {
        prop_assume!(start + 1 + gap <= 13);
        let cards = vec![
            Card::suited(Suit::Spades, start),
            Card::suited(Suit::Spades, start + 1 + gap),
            Card::joker(0),
        ];
        let classified = rules::classify(&cards);
        if gap <= 1 {
            prop_assert_eq!(classified, Some(PlayType::Stairs));
        } else {
            prop_assert_eq!(classified, None);
        }
    }

    /// Reversal flips the beat direction exactly: for two suited singles of
    /// different strength, one and only one ordering accepts the play.
    #[test]
    fn reversal_flips_single_legality(
        rank_a in 1u8..=13,
        rank_b in 1u8..=13,
        suit_a in 0u8..=3,
        suit_b in 0u8..=3,
    ) {
        let a = Card::suited(suit(suit_a), rank_a);
        let b = Card::suited(suit(suit_b), rank_b);

        let normal = rules::evaluate(&[a], &single_field(b, false)).is_ok();
        let reversed = rules::evaluate(&[a], &single_field(b, true)).is_ok();

        if a.strength == b.strength {
            prop_assert!(!normal && !reversed);
        } else {
            prop_assert_ne!(normal, reversed);
        }
    }

    /// Any seed deals the full deck into four disjoint hands, and the same
    /// seed deals the same hands.
    #[test]
    fn deal_partitions_the_deck_for_any_seed(seed in any::<u64>()) {
        let hands = deck::deal(seed);
        let mut ids: Vec<u8> = hands.iter().flatten().map(|c| c.id.0).collect();
        prop_assert_eq!(ids.len(), deck::DECK_SIZE);
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), deck::DECK_SIZE);
        for hand in &hands {
            prop_assert!(hand.windows(2).all(|w| w[0] <= w[1]));
        }
        prop_assert_eq!(hands.len(), SEATS);
        prop_assert_eq!(deck::deal(seed), hands);
    }
}
