//! Per-match mutable state and seat math.

use super::cards_types::Card;

pub const SEATS: usize = 4;

/// Seat index, 0..=3.
pub type SeatIx = u8;

/// Match progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Seats still joining; no cards dealt.
    Lobby,
    /// A round is underway.
    Playing,
    /// Three seats finished; waiting for the next round to start.
    RoundOver,
    /// Round cap reached.
    MatchOver,
}

/// Combination category the field currently requires.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PlayType {
    Single,
    Pair,
    Stairs,
}

/// The single mutable record per match. Written only by `transition`;
/// everything else (rules, bot, snapshots) reads.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub phase: Phase,
    /// 1-based once the first round starts; 0 in the lobby.
    pub round_no: u8,
    pub max_rounds: u8,
    /// Cards currently on the table; empty means the next player is
    /// unconstrained.
    pub field: Vec<Card>,
    pub last_play_type: PlayType,
    /// Seat that placed `field`; None when nothing has been played since
    /// the last reset.
    pub last_player: Option<SeatIx>,
    /// Seat whose move is awaited.
    pub turn: SeatIx,
    /// Seats that passed since the field was last replaced.
    pub passed: [bool; SEATS],
    /// Seats that emptied their hand legitimately, in finishing order.
    pub winners: Vec<SeatIx>,
    /// Seats eliminated for an illegal finishing move.
    pub fouled: Vec<SeatIx>,
    /// Global rank-order inversion, toggled by 4+ card plays.
    pub revolution: bool,
    /// Temporary inversion from a rank-11 play; cleared on field reset.
    pub eleven_back: bool,
    /// Suit-lock; cleared on field reset.
    pub bind: bool,
    pub hands: [Vec<Card>; SEATS],
    /// Cumulative scores across rounds of this match.
    pub scores_total: [i16; SEATS],
}

impl MatchState {
    pub fn new(max_rounds: u8) -> Self {
        Self {
            phase: Phase::Lobby,
            round_no: 0,
            max_rounds,
            field: Vec::new(),
            last_play_type: PlayType::Single,
            last_player: None,
            turn: 0,
            passed: [false; SEATS],
            winners: Vec::new(),
            fouled: Vec::new(),
            revolution: false,
            eleven_back: false,
            bind: false,
            hands: Default::default(),
            scores_total: [0; SEATS],
        }
    }

    /// The ranking direction in force: revolution and eleven-back cancel
    /// each other out.
    pub fn effective_reversed(&self) -> bool {
        self.revolution != self.eleven_back
    }

    pub fn finished(&self, seat: SeatIx) -> bool {
        self.winners.contains(&seat) || self.fouled.contains(&seat)
    }

    pub fn active_seats(&self) -> usize {
        SEATS - self.winners.len() - self.fouled.len()
    }

    pub fn passed_count(&self) -> usize {
        self.passed.iter().filter(|p| **p).count()
    }

    /// Clear the table. Eleven-back and the suit-lock do not survive a
    /// reset; revolution does.
    pub fn reset_field(&mut self) {
        self.field.clear();
        self.passed = [false; SEATS];
        self.last_play_type = PlayType::Single;
        self.bind = false;
        self.eleven_back = false;
    }
}

#[inline]
pub fn next_seat(seat: SeatIx) -> SeatIx {
    (seat + 1) % SEATS as SeatIx
}

/// Next seat clockwise from `from` that has not finished. Bounded scan so
/// a fully-finished table cannot loop forever.
pub fn next_eligible_seat(state: &MatchState, from: SeatIx) -> SeatIx {
    let mut seat = from;
    for _ in 0..SEATS {
        seat = next_seat(seat);
        if !state.finished(seat) {
            return seat;
        }
    }
    from
}
