//! Canonical chess-rule constants.
//!
//! Piece-id sub-ranges within each side, the starting layout, and the
//! castling geometry derived from them.

use crate::game_state::chess_types::{Color, PieceId, Square, PIECE_COUNT};

/// Offsets within a side's sixteen ids.
pub const QUEENSIDE_ROOK: PieceId = 8;
pub const KINGSIDE_ROOK: PieceId = 9;
pub const QUEEN: PieceId = 14;
pub const KING: PieceId = 15;

/// Starting square of every piece, indexed by `PieceId`.
pub const STARTING_SQUARES: [Square; PIECE_COUNT] = [
    // Light pawns, rooks, knights, bishops, queen, king.
    48, 49, 50, 51, 52, 53, 54, 55, 56, 63, 57, 62, 58, 61, 59, 60,
    // Dark mirrors Light by row.
    8, 9, 10, 11, 12, 13, 14, 15, 0, 7, 1, 6, 2, 5, 3, 4,
];

/// Board layout of the standard starting position, first row = row 0.
pub const STARTING_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[inline]
pub const fn king_id(color: Color) -> PieceId {
    color.id_offset() + KING
}

#[inline]
pub const fn rook_id(color: Color, kingside: bool) -> PieceId {
    color.id_offset() + if kingside { KINGSIDE_ROOK } else { QUEENSIDE_ROOK }
}

/// Rook relocation implied by a king displacement of two columns.
///
/// Returns `(rook, rook_from, rook_to)` for a castling king move.
#[inline]
pub fn castling_rook_move(king: PieceId, from: Square, to: Square) -> Option<(PieceId, Square, Square)> {
    if from / 8 != to / 8 {
        return None;
    }
    let color = Color::of_piece(king);
    match to as i16 - from as i16 {
        2 => Some((rook_id(color, true), from + 3, from + 1)),
        -2 => Some((rook_id(color, false), from.checked_sub(4)?, from - 1)),
        _ => None,
    }
}
