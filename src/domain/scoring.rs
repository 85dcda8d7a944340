//! Round points by finishing rank.

use super::state::{SeatIx, SEATS};

/// Points per finishing rank: 1st..4th. Sums to zero.
pub const RANK_POINTS: [i16; SEATS] = [2, 1, -1, -2];

/// Assign round points from finishing order. Winners take the top ranks in
/// finishing order; fouled seats always fill the bottom ranks (in the order
/// they fouled), regardless of when in the round they were eliminated.
pub fn round_points(winners: &[SeatIx], fouled: &[SeatIx]) -> [i16; SEATS] {
    let mut points = [0i16; SEATS];
    let mut rank = 0usize;
    for &seat in winners.iter().chain(fouled.iter()) {
        if rank < SEATS {
            points[seat as usize] = RANK_POINTS[rank];
            rank += 1;
        }
    }
    points
}
