//! Keyed dispatch from a piece's current kind to its destination generator.
//!
//! Destinations are pseudo-legal: movement, blocking and occupancy rules hold,
//! but the mover's own king may be left attacked. Output order is fixed per
//! kind so tree shape and search results are reproducible.

use crate::game_state::chess_types::{Color, Move, PieceId, PieceKind, Square};
use crate::game_state::position_state::{Occupancy, PositionState};
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::king_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::pawn_destinations;
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;

/// Appends the destinations of `piece` using a prebuilt occupancy view.
///
/// Captured pieces produce nothing.
pub fn generate_destinations_with(
    position: &PositionState,
    occupancy: &Occupancy,
    piece: PieceId,
    out: &mut Vec<Square>,
) {
    let Some(from) = position.square_of(piece) else {
        return;
    };
    match position.kind_of(piece) {
        PieceKind::Pawn => pawn_destinations(position, occupancy, piece, from, out),
        PieceKind::Knight => knight_destinations(occupancy, piece, from, out),
        PieceKind::Bishop => bishop_destinations(occupancy, piece, from, out),
        PieceKind::Rook => rook_destinations(occupancy, piece, from, out),
        PieceKind::Queen => queen_destinations(occupancy, piece, from, out),
        PieceKind::King => king_destinations(position, occupancy, piece, from, out),
    }
}

/// Pseudo-legal destinations of one piece.
pub fn piece_destinations(position: &PositionState, piece: PieceId) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    generate_destinations_with(position, &position.occupancy(), piece, &mut out);
    out
}

/// Pseudo-legal moves for every piece of `color`, in ascending id order.
pub fn pseudo_legal_moves(position: &PositionState, color: Color) -> Vec<Move> {
    let occupancy = position.occupancy();
    let mut destinations = Vec::with_capacity(28);
    let mut moves = Vec::with_capacity(48);
    for piece in color.piece_ids() {
        destinations.clear();
        generate_destinations_with(position, &occupancy, piece, &mut destinations);
        moves.extend(destinations.iter().map(|to| Move::new(piece, *to)));
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::king_id;
    use crate::game_state::chess_types::BOARD_SQUARES;
    use crate::game_state::position_state::sparse_position;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_no_own_targets(position: &PositionState) {
        for color in [Color::Light, Color::Dark] {
            for mv in pseudo_legal_moves(position, color) {
                assert!((mv.to as usize) < BOARD_SQUARES);
                let holder = position.piece_at(mv.to);
                assert!(
                    !matches!(holder, Some(other) if Color::of_piece(other) == color),
                    "{mv:?} lands on its own piece"
                );
            }
        }
    }

    #[test]
    fn opening_move_counts() {
        let position = PositionState::new_game();
        assert_eq!(pseudo_legal_moves(&position, Color::Light).len(), 20);
        assert_eq!(pseudo_legal_moves(&position, Color::Dark).len(), 20);
    }

    #[test]
    fn captured_piece_has_no_destinations() {
        let position = sparse_position(&[]);
        assert!(piece_destinations(&position, 14).is_empty());
    }

    #[test]
    fn promoted_pawn_moves_as_its_new_kind() {
        let position = sparse_position(&[(16, 50)]).with_move(16, 58);
        assert_eq!(position.kind_of(16), PieceKind::Queen);
        // Queen on c1 (58): row 7 to the left, the c-file, two diagonals.
        assert!(piece_destinations(&position, 16).len() > 10);
    }

    #[test]
    fn never_targets_own_piece() {
        let mut position = PositionState::new_game();
        let script = [(4, 36), (20, 28), (14, 31), (26, 18), (13, 34), (30, 21), (11, 45)];
        for (piece, to) in script {
            position = position.with_move(piece, to);
            assert_no_own_targets(&position);
        }
    }

    #[test]
    fn random_playouts_never_target_own_piece() {
        let mut rng = StdRng::seed_from_u64(0x5eed_c0de);
        for _ in 0..40 {
            let mut position = PositionState::new_game();
            let mut mover = Color::Light;
            for _ in 0..120 {
                assert_no_own_targets(&position);
                let moves = pseudo_legal_moves(&position, mover);
                if moves.is_empty() {
                    break;
                }
                let mv = moves[rng.random_range(0..moves.len())];
                position = position.with_move(mv.piece, mv.to);
                if !position.is_on_board(king_id(mover.opposite())) {
                    break;
                }
                mover = mover.opposite();
            }
        }
    }
}
