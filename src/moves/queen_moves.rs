use crate::game_state::chess_types::{PieceId, Square};
use crate::game_state::position_state::Occupancy;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::rook_moves::rook_destinations;

/// Rook sweeps followed by bishop sweeps.
#[inline]
pub fn queen_destinations(occupancy: &Occupancy, piece: PieceId, from: Square, out: &mut Vec<Square>) {
    rook_destinations(occupancy, piece, from, out);
    bishop_destinations(occupancy, piece, from, out);
}
