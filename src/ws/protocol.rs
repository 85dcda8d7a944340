//! Wire protocol: tagged JSON messages over the WebSocket.

use serde::{Deserialize, Serialize};

use crate::domain::snapshot::StateSnapshot;
use crate::domain::{CardId, SeatIx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One human, three bot seats, starts immediately.
    Solo,
    /// Up to four humans sharing a join token.
    Social,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Join {
        mode: Mode,
        #[serde(default)]
        token: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Play {
        card_ids: Vec<CardId>,
    },
    Pass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    SeatAssigned {
        seat: SeatIx,
        token: String,
    },
    RosterChanged {
        count: u8,
        names: Vec<String>,
    },
    State {
        snapshot: StateSnapshot,
    },
    Announcement {
        text: String,
    },
    RoundResult {
        per_seat: Vec<SeatResult>,
        round: u8,
        is_final_round: bool,
    },
    /// Join rejected: the room is full or its match already started.
    MatchFull,
    /// A seat dropped; the match is gone for everyone.
    MatchAborted {
        reason: String,
    },
    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeatResult {
    pub name: String,
    pub score: i16,
    pub round_points: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    IllegalPlay,
}
