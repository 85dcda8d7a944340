//! Match orchestration on top of the room registry: applying human
//! intents, driving bot seats on a timer, and restarting rounds.
//!
//! Timers never hold a room alive. A scheduled task re-resolves the room
//! by token when it fires and becomes a no-op if the room is gone.

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::{BotMove, BotPlayer, MinForce};
use crate::domain::snapshot;
use crate::domain::state::{Phase, SeatIx, SEATS};
use crate::domain::transition::{self, Announce, RoundSummary, TransitionEvent};
use crate::domain::CardId;
use crate::errors::domain::{DomainError, RuleViolation};
use crate::services::rooms::{broadcast, IntentRejection, Room, RoomInner, Rooms, SeatKind};
use crate::ws::protocol::{SeatResult, ServerMsg};

impl Rooms {
    /// Deal the first round of a freshly filled room.
    pub(crate) fn start_match(self: &Arc<Self>, room: &Arc<Room>) {
        {
            let mut inner = room.inner.lock();
            if inner.state.phase != Phase::Lobby {
                return;
            }
            let seed: u64 = rand::random();
            let opener: SeatIx = rand::rng().random_range(0..SEATS as SeatIx);
            transition::start_round(&mut inner.state, seed, opener);
            info!(token = %room.token, opener, "[GAME FLOW] match started");
            Self::broadcast_state(&inner);
        }
        self.after_transition(room);
    }

    pub fn play(self: &Arc<Self>, conn_id: Uuid, card_ids: &[CardId]) -> Result<(), IntentRejection> {
        self.apply_intent(conn_id, |inner, seat| {
            transition::apply_play(&mut inner.state, seat, card_ids)
        })
    }

    pub fn pass(self: &Arc<Self>, conn_id: Uuid) -> Result<(), IntentRejection> {
        self.apply_intent(conn_id, |inner, seat| {
            transition::apply_pass(&mut inner.state, seat)
        })
    }

    fn apply_intent<F>(self: &Arc<Self>, conn_id: Uuid, apply: F) -> Result<(), IntentRejection>
    where
        F: FnOnce(&mut RoomInner, SeatIx) -> Result<Vec<TransitionEvent>, DomainError>,
    {
        let Some(token) = self.conns.get(&conn_id).map(|t| t.value().clone()) else {
            return Err(IntentRejection::Silent);
        };
        let Some(room) = self.rooms.get(&token).map(|r| r.value().clone()) else {
            return Err(IntentRejection::Silent);
        };

        {
            let mut inner = room.inner.lock();
            let Some(seat) = inner.seat_of(conn_id) else {
                return Err(IntentRejection::Silent);
            };
            let events = apply(&mut inner, seat).map_err(reject)?;
            Self::send_events(&inner, &events);
            Self::broadcast_state(&inner);
        }
        self.after_transition(&room);
        Ok(())
    }

    /// Look at where the state machine landed and schedule whatever keeps
    /// the match moving.
    fn after_transition(self: &Arc<Self>, room: &Arc<Room>) {
        let inner = room.inner.lock();
        match inner.state.phase {
            Phase::Playing => {
                let turn = inner.state.turn as usize;
                let bot = matches!(
                    inner.seats.get(turn).map(|s| &s.kind),
                    Some(SeatKind::Bot)
                );
                drop(inner);
                if bot {
                    self.schedule_bot(room.token.clone());
                }
            }
            Phase::RoundOver => {
                drop(inner);
                self.schedule_round_restart(room.token.clone());
            }
            Phase::Lobby | Phase::MatchOver => {}
        }
    }

    fn schedule_bot(self: &Arc<Self>, token: String) {
        let rooms = Arc::clone(self);
        let delay = self.config.bot_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            rooms.run_bot_turn(&token);
        });
    }

    fn schedule_round_restart(self: &Arc<Self>, token: String) {
        let rooms = Arc::clone(self);
        let delay = self.config.round_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            rooms.start_next_round(&token);
        });
    }

    fn run_bot_turn(self: &Arc<Self>, token: &str) {
        let Some(room) = self.rooms.get(token).map(|r| r.value().clone()) else {
            return;
        };

        {
            let mut inner = room.inner.lock();
            if inner.state.phase != Phase::Playing {
                return;
            }
            let seat = inner.state.turn;
            if !matches!(inner.seats.get(seat as usize).map(|s| &s.kind), Some(SeatKind::Bot)) {
                return;
            }

            let chosen = match MinForce.choose(&inner.state, seat) {
                Ok(mv) => mv,
                Err(err) => {
                    warn!(token, seat, error = %err, "[GAME FLOW] bot failed to choose, passing");
                    BotMove::Pass
                }
            };

            let events = match chosen {
                BotMove::Play(ids) => match transition::apply_play(&mut inner.state, seat, &ids) {
                    Ok(events) => events,
                    Err(err) => {
                        warn!(token, seat, error = %err, "[GAME FLOW] bot play rejected, passing");
                        transition::apply_pass(&mut inner.state, seat).unwrap_or_default()
                    }
                },
                BotMove::Pass => transition::apply_pass(&mut inner.state, seat).unwrap_or_default(),
            };

            Self::send_events(&inner, &events);
            Self::broadcast_state(&inner);
        }
        self.after_transition(&room);
    }

    fn start_next_round(self: &Arc<Self>, token: &str) {
        let Some(room) = self.rooms.get(token).map(|r| r.value().clone()) else {
            return;
        };

        {
            let mut inner = room.inner.lock();
            if inner.state.phase != Phase::RoundOver {
                return;
            }
            let seed: u64 = rand::random();
            let opener: SeatIx = rand::rng().random_range(0..SEATS as SeatIx);
            transition::start_round(&mut inner.state, seed, opener);
            info!(token, round = inner.state.round_no, opener, "[GAME FLOW] next round started");
            Self::broadcast_state(&inner);
        }
        self.after_transition(&room);
    }

    /// Each human seat gets its own view; bot seats get nothing.
    fn broadcast_state(inner: &RoomInner) {
        let names = inner.names();
        for (ix, seat) in inner.seats.iter().enumerate() {
            if let SeatKind::Human { addr, .. } = &seat.kind {
                let snap = snapshot::snapshot_for(&inner.state, &names, ix as SeatIx);
                let _ = addr.do_send(crate::ws::session::Outbound(ServerMsg::State {
                    snapshot: snap,
                }));
            }
        }
    }

    fn send_events(inner: &RoomInner, events: &[TransitionEvent]) {
        for event in events {
            let msg = match event {
                TransitionEvent::Announce(announce) => ServerMsg::Announcement {
                    text: announce_text(inner, *announce),
                },
                TransitionEvent::RoundOver(summary) => round_result(inner, summary),
            };
            broadcast(&inner.seats, &msg);
        }
    }
}

fn reject(err: DomainError) -> IntentRejection {
    match err.kind() {
        // Late, duplicated, or empty input from a laggy client, not a
        // mistake worth surfacing.
        RuleViolation::OutOfTurn | RuleViolation::PhaseMismatch | RuleViolation::EmptyPlay => {
            IntentRejection::Silent
        }
        _ => {
            let DomainError::Validation(_, detail) = err;
            IntentRejection::Answer(detail)
        }
    }
}

fn seat_name(inner: &RoomInner, seat: SeatIx) -> String {
    inner
        .seats
        .get(seat as usize)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Seat {seat}"))
}

fn announce_text(inner: &RoomInner, announce: Announce) -> String {
    match announce {
        Announce::Cut => "Eight cut!".to_string(),
        Announce::SpecialReturn => "Spade three return!".to_string(),
        Announce::Revolution => "Revolution!".to_string(),
        Announce::ElevenBack => "Eleven back!".to_string(),
        Announce::Sweep => "Field swept".to_string(),
        Announce::Foul { seat } => format!("{} fouled out!", seat_name(inner, seat)),
        Announce::Finished { seat } => format!("{} went out!", seat_name(inner, seat)),
    }
}

fn round_result(inner: &RoomInner, summary: &RoundSummary) -> ServerMsg {
    let per_seat = (0..SEATS)
        .map(|ix| SeatResult {
            name: seat_name(inner, ix as SeatIx),
            score: inner.state.scores_total[ix],
            round_points: summary.points[ix],
        })
        .collect();
    ServerMsg::RoundResult {
        per_seat,
        round: summary.round_no,
        is_final_round: summary.is_final,
    }
}
