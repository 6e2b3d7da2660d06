use crate::game_state::chess_types::{PieceId, Square};
use crate::game_state::position_state::Occupancy;
use crate::move_generation::legal_move_shared::{push_hops, Direction};

/// Two-up/one-side pairs first, then one-row/two-column hops.
pub const KNIGHT_HOPS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, 2),
    (1, 2),
    (-1, -2),
    (1, -2),
];

#[inline]
pub fn knight_destinations(occupancy: &Occupancy, piece: PieceId, from: Square, out: &mut Vec<Square>) {
    push_hops(occupancy, piece, from, &KNIGHT_HOPS, out);
}

#[cfg(test)]
mod tests {
    use super::knight_destinations;
    use crate::game_state::chess_types::PositionState;
    use crate::game_state::position_state::sparse_position;

    #[test]
    fn knight_on_home_square_has_two_targets() {
        let position = PositionState::new_game();
        let mut out = Vec::new();
        knight_destinations(&position.occupancy(), 26, 1, &mut out);
        assert_eq!(out, vec![16, 18]);

        out.clear();
        knight_destinations(&position.occupancy(), 11, 62, &mut out);
        assert_eq!(out, vec![45, 47]);
    }

    #[test]
    fn knight_in_center_has_eight_targets() {
        let position = sparse_position(&[(10, 27)]);
        let mut out = Vec::new();
        knight_destinations(&position.occupancy(), 10, 27, &mut out);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn knight_on_edge_does_not_wrap() {
        let position = sparse_position(&[(10, 31)]);
        let mut out = Vec::new();
        knight_destinations(&position.occupancy(), 10, 31, &mut out);
        // h5 reaches g7, g3, f6, f4 only.
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|sq| sq % 8 >= 5));
    }
}
