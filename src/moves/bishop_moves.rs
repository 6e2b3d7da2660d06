//! Bishop destination generation: four diagonal sweeps, each stopping at the
//! first occupied square.

use crate::game_state::chess_types::{PieceId, Square};
use crate::game_state::position_state::Occupancy;
use crate::move_generation::legal_move_shared::{trace_ray, Direction};

/// Up-left, up-right, down-left, down-right.
pub const BISHOP_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[inline]
pub fn bishop_destinations(
    occupancy: &Occupancy,
    piece: PieceId,
    from: Square,
    out: &mut Vec<Square>,
) {
    for direction in BISHOP_DIRECTIONS {
        trace_ray(occupancy, piece, from, direction, out);
    }
}
