//! Bot player trait definition.

use std::fmt;

use crate::domain::state::{MatchState, SeatIx};
use crate::domain::CardId;

/// Errors that can occur during bot decision-making. Always downgraded to
/// a pass at the call site so a confused bot can never stall a match.
#[derive(Debug)]
pub enum BotError {
    Internal(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotMove {
    Play(Vec<CardId>),
    Pass,
}

/// A seat that chooses its own moves. Implementations must only produce
/// plays that the rule engine accepts; they see the full match state but
/// are expected to read only their own hand from it.
pub trait BotPlayer: Send + Sync {
    fn choose(&self, state: &MatchState, seat: SeatIx) -> Result<BotMove, BotError>;
}
