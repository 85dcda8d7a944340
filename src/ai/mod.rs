//! Bot players. Every bot moves through the same rule engine and
//! transition path as a human seat.

pub mod minforce;
pub mod trait_def;

pub use minforce::MinForce;
pub use trait_def::{BotError, BotMove, BotPlayer};
