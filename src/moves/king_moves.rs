//! King destination generation.
//!
//! Adjacent squares plus up to two castling targets. Castling only requires
//! an unmoved king, the matching unmoved rook on its corner, and empty squares
//! between them; whether the king passes through an attacked square is not
//! examined here.

use crate::game_state::chess_rules::rook_id;
use crate::game_state::chess_types::{offset_square, Color, PieceId, PieceKind, Square};
use crate::game_state::position_state::{Occupancy, PositionState};
use crate::move_generation::legal_move_shared::{push_hops, Direction};

pub const KING_STEPS: [Direction; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn king_destinations(
    position: &PositionState,
    occupancy: &Occupancy,
    piece: PieceId,
    from: Square,
    out: &mut Vec<Square>,
) {
    push_hops(occupancy, piece, from, &KING_STEPS, out);

    if position.has_moved(piece) {
        return;
    }
    let color = Color::of_piece(piece);

    if castling_path_clear(position, occupancy, from, rook_id(color, true), 3) {
        if let Some(to) = offset_square(from, 0, 2) {
            out.push(to);
        }
    }
    if castling_path_clear(position, occupancy, from, rook_id(color, false), -4) {
        if let Some(to) = offset_square(from, 0, -2) {
            out.push(to);
        }
    }
}

/// Rook `rook` must sit unmoved `rook_offset` columns away with nothing between.
fn castling_path_clear(
    position: &PositionState,
    occupancy: &Occupancy,
    king_from: Square,
    rook: PieceId,
    rook_offset: i8,
) -> bool {
    let Some(rook_square) = offset_square(king_from, 0, rook_offset) else {
        return false;
    };
    if occupancy.piece_at(rook_square) != Some(rook)
        || position.has_moved(rook)
        || position.kind_of(rook) != PieceKind::Rook
    {
        return false;
    }

    let step = rook_offset.signum();
    (1..rook_offset.abs()).all(|distance| {
        offset_square(king_from, 0, step * distance).is_some_and(|sq| occupancy.is_empty(sq))
    })
}

#[cfg(test)]
mod tests {
    use super::king_destinations;
    use crate::game_state::chess_types::PositionState;
    use crate::game_state::position_state::sparse_position;

    fn destinations(position: &PositionState, piece: u8) -> Vec<u8> {
        let mut out = Vec::new();
        let from = position.square_of(piece).unwrap();
        king_destinations(position, &position.occupancy(), piece, from, &mut out);
        out
    }

    #[test]
    fn king_in_corner_has_three_steps() {
        let position = sparse_position(&[(31, 0)]);
        assert_eq!(destinations(&position, 31), vec![1, 8, 9]);
    }

    #[test]
    fn king_boxed_in_at_start() {
        assert!(destinations(&PositionState::new_game(), 31).is_empty());
    }

    #[test]
    fn castling_both_sides_when_clear() {
        let position = sparse_position(&[(24, 0), (25, 7)]);
        let out = destinations(&position, 31);
        assert!(out.contains(&6));
        assert!(out.contains(&2));
    }

    #[test]
    fn castling_blocked_by_piece_between() {
        let position = sparse_position(&[(24, 0), (25, 7), (26, 1)]);
        let out = destinations(&position, 31);
        assert!(out.contains(&6));
        assert!(!out.contains(&2));
    }

    #[test]
    fn castling_needs_unmoved_rook_and_king() {
        let base = sparse_position(&[(8, 56), (9, 63)]);
        // Rook steps out and back: its flag stays set.
        let rook_moved = base.with_move(9, 55).with_move(9, 63);
        let out = destinations(&rook_moved, 15);
        assert!(!out.contains(&62));
        assert!(out.contains(&58));

        let king_moved = base.with_move(15, 59).with_move(15, 60);
        let out = destinations(&king_moved, 15);
        assert!(!out.contains(&62));
        assert!(!out.contains(&58));
    }

    #[test]
    fn castling_ignores_attacked_transit_squares() {
        // Dark rook eyes f1 (61); the generator still offers kingside castling.
        let position = sparse_position(&[(9, 63), (24, 5)]);
        assert!(destinations(&position, 15).contains(&62));
    }
}
