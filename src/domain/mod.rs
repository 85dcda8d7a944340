//! Domain layer: pure game logic, no I/O.

pub mod cards_parsing;
pub mod cards_types;
pub mod deck;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod transition;

#[cfg(test)]
mod tests_props_rules;
#[cfg(test)]
mod tests_rules;

// Re-exports for ergonomics
pub use cards_types::{Card, CardId, Suit};
pub use state::{MatchState, Phase, PlayType, SeatIx, SEATS};
