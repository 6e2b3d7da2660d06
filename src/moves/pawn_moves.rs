//! Pawn destination generation for the search representation.
//!
//! Single advance, double advance from an unmoved pawn, and diagonal
//! captures. En passant is left to the interactive board, which knows the
//! move history; the search never generates it.

use crate::game_state::chess_types::{offset_square, Color, PieceId, Square};
use crate::game_state::position_state::{Occupancy, PositionState};

pub fn pawn_destinations(
    position: &PositionState,
    occupancy: &Occupancy,
    piece: PieceId,
    from: Square,
    out: &mut Vec<Square>,
) {
    let forward = Color::of_piece(piece).forward();

    if let Some(one_step) = offset_square(from, forward, 0) {
        if occupancy.is_empty(one_step) {
            out.push(one_step);
            if !position.has_moved(piece) {
                if let Some(two_step) = offset_square(from, 2 * forward, 0) {
                    if occupancy.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for d_column in [-1, 1] {
        if let Some(to) = offset_square(from, forward, d_column) {
            if occupancy.holds_enemy_of(to, piece) {
                out.push(to);
            }
        }
    }
}
