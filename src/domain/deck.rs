//! Deck construction, seeded shuffling, and dealing.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cards_types::{Card, Suit};
use super::state::SEATS;

/// 52 suited cards plus two jokers.
pub const DECK_SIZE: usize = 54;

/// Full deck in canonical order (id order).
pub fn build_deck() -> Vec<Card> {
    let suits = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in suits {
        for rank in 1..=13 {
            deck.push(Card::suited(suit, rank));
        }
    }
    deck.push(Card::joker(0));
    deck.push(Card::joker(1));
    deck
}

fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = build_deck();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}

/// Deal the full shuffled deck round-robin across the 4 seats.
/// With 54 cards, two seats end up holding 14. Hands come back sorted.
pub fn deal(seed: u64) -> [Vec<Card>; SEATS] {
    let deck = shuffled_deck(seed);
    let mut hands: [Vec<Card>; SEATS] = Default::default();
    for (i, card) in deck.into_iter().enumerate() {
        hands[i % SEATS].push(card);
    }
    for hand in hands.iter_mut() {
        sort_hand(hand);
    }
    hands
}

/// Display order: ascending strength, ties broken by suit ordinal.
pub fn sort_hand(hand: &mut [Card]) {
    hand.sort();
}
