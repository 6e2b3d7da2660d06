use crate::game_state::chess_types::{PieceId, Square};
use crate::game_state::position_state::Occupancy;
use crate::move_generation::legal_move_shared::{trace_ray, Direction};

/// Up, down, left, right.
pub const ROOK_DIRECTIONS: [Direction; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn rook_destinations(occupancy: &Occupancy, piece: PieceId, from: Square, out: &mut Vec<Square>) {
    for direction in ROOK_DIRECTIONS {
        trace_ray(occupancy, piece, from, direction, out);
    }
}
