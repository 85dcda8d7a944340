//! Room registry and seat lifecycle. A room owns one match; every mutation
//! of a match happens under that room's lock.

use std::sync::Arc;

use actix::Recipient;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::domain::state::{MatchState, Phase, SeatIx, SEATS};
use crate::ws::protocol::{Mode, ServerMsg};
use crate::ws::session::Outbound;

pub const MAX_TOKEN_LEN: usize = 15;
pub const MAX_NAME_LEN: usize = 12;
pub const DEFAULT_TOKEN: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    /// The room is full or its match already started.
    Full,
    /// This connection already holds a seat somewhere.
    AlreadySeated,
}

/// How a rejected play/pass intent is reported back to the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentRejection {
    /// Stale or out-of-turn input; dropped without a reply.
    Silent,
    /// A real rule violation the player should see.
    Answer(String),
}

pub enum SeatKind {
    Human {
        conn_id: Uuid,
        addr: Recipient<Outbound>,
    },
    Bot,
}

pub struct Seat {
    pub name: String,
    pub kind: SeatKind,
}

pub struct RoomInner {
    pub seats: Vec<Seat>,
    pub state: MatchState,
}

impl RoomInner {
    pub fn seat_of(&self, conn_id: Uuid) -> Option<SeatIx> {
        self.seats.iter().position(|s| match &s.kind {
            SeatKind::Human { conn_id: id, .. } => *id == conn_id,
            SeatKind::Bot => false,
        }).map(|ix| ix as SeatIx)
    }

    pub fn names(&self) -> [String; SEATS] {
        let mut names: [String; SEATS] = Default::default();
        for (slot, seat) in names.iter_mut().zip(self.seats.iter()) {
            *slot = seat.name.clone();
        }
        names
    }

    pub fn humans(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| matches!(s.kind, SeatKind::Human { .. }))
            .count()
    }
}

pub struct Room {
    pub token: String,
    pub mode: Mode,
    pub inner: Mutex<RoomInner>,
}

/// Shared registry of all live rooms, keyed by join token. Connections map
/// back to their room so play intents only carry a connection id.
pub struct Rooms {
    pub(crate) config: ServerConfig,
    pub(crate) rooms: DashMap<String, Arc<Room>>,
    pub(crate) conns: DashMap<Uuid, String>,
}

/// Deliver a message to every human seat. Dead recipients are skipped; the
/// disconnect path will reap them.
pub(crate) fn broadcast(seats: &[Seat], msg: &ServerMsg) {
    for seat in seats {
        if let SeatKind::Human { addr, .. } = &seat.kind {
            let _ = addr.do_send(Outbound(msg.clone()));
        }
    }
}

pub(crate) fn send_to(seat: &Seat, msg: ServerMsg) {
    if let SeatKind::Human { addr, .. } = &seat.kind {
        let _ = addr.do_send(Outbound(msg));
    }
}

fn sanitize(raw: &str, max_len: usize) -> String {
    raw.trim().chars().take(max_len).collect()
}

impl Rooms {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            rooms: DashMap::new(),
            conns: DashMap::new(),
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn join(
        self: &Arc<Self>,
        conn_id: Uuid,
        addr: Recipient<Outbound>,
        mode: Mode,
        token: Option<String>,
        name: Option<String>,
    ) -> Result<(), JoinError> {
        if self.conns.contains_key(&conn_id) {
            return Err(JoinError::AlreadySeated);
        }

        let name = name
            .as_deref()
            .map(|n| sanitize(n, MAX_NAME_LEN))
            .filter(|n| !n.is_empty());

        match mode {
            Mode::Solo => self.join_solo(conn_id, addr, name),
            Mode::Social => {
                let token = token
                    .as_deref()
                    .map(|t| sanitize(t, MAX_TOKEN_LEN))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_TOKEN.to_string());
                self.join_social(conn_id, addr, token, name)
            }
        }
    }

    /// Solo rooms are keyed by a fresh token so two solo players can never
    /// land in the same match.
    fn join_solo(
        self: &Arc<Self>,
        conn_id: Uuid,
        addr: Recipient<Outbound>,
        name: Option<String>,
    ) -> Result<(), JoinError> {
        let token = Uuid::new_v4().simple().to_string();
        let mut seats = vec![Seat {
            name: name.unwrap_or_else(|| "Guest1".to_string()),
            kind: SeatKind::Human { conn_id, addr },
        }];
        for n in 1..SEATS {
            seats.push(Seat {
                name: format!("Bot {n}"),
                kind: SeatKind::Bot,
            });
        }
        let room = Arc::new(Room {
            token: token.clone(),
            mode: Mode::Solo,
            inner: Mutex::new(RoomInner {
                seats,
                state: MatchState::new(self.config.max_rounds),
            }),
        });
        self.rooms.insert(token.clone(), room.clone());
        self.conns.insert(conn_id, token.clone());

        {
            let inner = room.inner.lock();
            send_to(
                &inner.seats[0],
                ServerMsg::SeatAssigned { seat: 0, token },
            );
            broadcast(
                &inner.seats,
                &ServerMsg::RosterChanged {
                    count: inner.seats.len() as u8,
                    names: inner.seats.iter().map(|s| s.name.clone()).collect(),
                },
            );
        }
        info!(token = %room.token, "[ROOMS] solo room created");
        self.start_match(&room);
        Ok(())
    }

    fn join_social(
        self: &Arc<Self>,
        conn_id: Uuid,
        addr: Recipient<Outbound>,
        token: String,
        name: Option<String>,
    ) -> Result<(), JoinError> {
        let room = Arc::clone(
            self.rooms
                .entry(token.clone())
                .or_insert_with(|| {
                    Arc::new(Room {
                        token: token.clone(),
                        mode: Mode::Social,
                        inner: Mutex::new(RoomInner {
                            seats: Vec::new(),
                            state: MatchState::new(self.config.max_rounds),
                        }),
                    })
                })
                .value(),
        );

        let start = {
            let mut inner = room.inner.lock();
            if inner.state.phase != Phase::Lobby || inner.seats.len() >= SEATS {
                return Err(JoinError::Full);
            }
            let seat_ix = inner.seats.len() as SeatIx;
            let name = name.unwrap_or_else(|| format!("Guest{}", seat_ix + 1));
            inner.seats.push(Seat {
                name,
                kind: SeatKind::Human { conn_id, addr },
            });
            self.conns.insert(conn_id, token.clone());

            send_to(
                &inner.seats[seat_ix as usize],
                ServerMsg::SeatAssigned {
                    seat: seat_ix,
                    token: token.clone(),
                },
            );
            broadcast(
                &inner.seats,
                &ServerMsg::RosterChanged {
                    count: inner.seats.len() as u8,
                    names: inner.seats.iter().map(|s| s.name.clone()).collect(),
                },
            );
            info!(token = %token, seat = seat_ix, "[ROOMS] social seat filled");
            inner.seats.len() == SEATS
        };

        if start {
            self.start_match(&room);
        }
        Ok(())
    }

    /// A socket went away. In a social lobby the seat is vacated;
    /// once a match has started the whole room is torn down.
    pub fn disconnect(&self, conn_id: Uuid) {
        let Some((_, token)) = self.conns.remove(&conn_id) else {
            return;
        };
        let Some(room) = self.rooms.get(&token).map(|r| r.value().clone()) else {
            return;
        };

        let mut inner = room.inner.lock();
        if room.mode == Mode::Social && inner.state.phase == Phase::Lobby {
            inner.seats.retain(|s| match &s.kind {
                SeatKind::Human { conn_id: id, .. } => *id != conn_id,
                SeatKind::Bot => true,
            });
            broadcast(
                &inner.seats,
                &ServerMsg::RosterChanged {
                    count: inner.seats.len() as u8,
                    names: inner.seats.iter().map(|s| s.name.clone()).collect(),
                },
            );
            if inner.humans() == 0 {
                drop(inner);
                self.rooms.remove(&token);
                info!(token = %token, "[ROOMS] empty lobby removed");
            }
            return;
        }

        if matches!(inner.state.phase, Phase::Playing | Phase::RoundOver) {
            broadcast(
                &inner.seats,
                &ServerMsg::MatchAborted {
                    reason: "A player disconnected".to_string(),
                },
            );
        }
        for seat in &inner.seats {
            if let SeatKind::Human { conn_id: id, .. } = &seat.kind {
                self.conns.remove(id);
            }
        }
        drop(inner);
        self.rooms.remove(&token);
        info!(token = %token, "[ROOMS] room torn down");
    }
}
