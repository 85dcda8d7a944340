//! Runtime configuration from environment variables.

use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_ROUNDS: u8 = 3;
pub const DEFAULT_BOT_DELAY_MS: u64 = 700;
pub const DEFAULT_ROUND_DELAY_MS: u64 = 4000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Rounds played before the match ends.
    pub max_rounds: u8,
    /// "Thinking" delay before a bot seat moves.
    pub bot_delay: Duration,
    /// Pause between a round ending and the next deal.
    pub round_delay: Duration,
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{key} must be a valid number, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("DAIFUGO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        // PORT is the conventional platform override; DAIFUGO_PORT wins
        // when both are set.
        let port = match std::env::var("DAIFUGO_PORT") {
            Ok(_) => env_parsed("DAIFUGO_PORT", DEFAULT_PORT)?,
            Err(_) => env_parsed("PORT", DEFAULT_PORT)?,
        };
        let max_rounds: u8 = env_parsed("DAIFUGO_MAX_ROUNDS", DEFAULT_MAX_ROUNDS)?;
        if max_rounds == 0 {
            return Err(AppError::config("DAIFUGO_MAX_ROUNDS must be at least 1"));
        }
        let bot_delay_ms: u64 = env_parsed("DAIFUGO_BOT_DELAY_MS", DEFAULT_BOT_DELAY_MS)?;
        let round_delay_ms: u64 = env_parsed("DAIFUGO_ROUND_DELAY_MS", DEFAULT_ROUND_DELAY_MS)?;

        Ok(Self {
            host,
            port,
            max_rounds,
            bot_delay: Duration::from_millis(bot_delay_ms),
            round_delay: Duration::from_millis(round_delay_ms),
        })
    }

    /// Short timers so tests never sit in real delays.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_rounds: 2,
            bot_delay: Duration::from_millis(1),
            round_delay: Duration::from_millis(1),
        }
    }
}
