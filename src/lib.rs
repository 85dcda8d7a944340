//! Server-authoritative Daifugo engine: four seats, rule validation on
//! every move, bot fill-in, and a WebSocket table protocol.

pub mod ai;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod health;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod ws;

pub use error::AppError;
