//! Check detection built on the destination generators.
//!
//! `is_square_attacked` is the one check-safety primitive. Check, checkmate and
//! stalemate are derived by callers from it and from whether the side to move
//! has any move that leaves its own king unattacked.

use crate::game_state::chess_types::{Color, Move, Square};
use crate::game_state::position_state::PositionState;
use crate::move_generation::move_generator::{generate_destinations_with, pseudo_legal_moves};

/// True when any piece of `attacker` has `square` among its destinations.
pub fn is_square_attacked(position: &PositionState, square: Square, attacker: Color) -> bool {
    let occupancy = position.occupancy();
    let mut destinations = Vec::with_capacity(28);
    for piece in attacker.piece_ids() {
        destinations.clear();
        generate_destinations_with(position, &occupancy, piece, &mut destinations);
        if destinations.contains(&square) {
            return true;
        }
    }
    false
}

/// A side whose king has been captured is never "in check".
#[inline]
pub fn is_king_in_check(position: &PositionState, color: Color) -> bool {
    let Some(king_square) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_square, color.opposite())
}

/// Pseudo-legal moves of `color` that do not leave its own king attacked.
pub fn king_safe_moves(position: &PositionState, color: Color) -> Vec<Move> {
    pseudo_legal_moves(position, color)
        .into_iter()
        .filter(|mv| !is_king_in_check(&position.with_move(mv.piece, mv.to), color))
        .collect()
}
