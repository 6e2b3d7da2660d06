//! Helpers shared by the per-kind destination generators.

use crate::game_state::chess_types::{offset_square, PieceId, Square};
use crate::game_state::position_state::Occupancy;

/// Row/column step of a sliding direction.
pub type Direction = (i8, i8);

/// Walks one direction square by square, emitting empty squares and stopping
/// at the first occupied one, which is emitted only if it holds an enemy.
#[inline]
pub fn trace_ray(
    occupancy: &Occupancy,
    piece: PieceId,
    from: Square,
    (d_row, d_column): Direction,
    out: &mut Vec<Square>,
) {
    let mut current = from;
    while let Some(next) = offset_square(current, d_row, d_column) {
        if occupancy.is_empty(next) {
            out.push(next);
            current = next;
            continue;
        }
        if occupancy.holds_enemy_of(next, piece) {
            out.push(next);
        }
        break;
    }
}

/// Emits each single-hop target that is on the board and not held by a friend.
#[inline]
pub fn push_hops(
    occupancy: &Occupancy,
    piece: PieceId,
    from: Square,
    hops: &[Direction],
    out: &mut Vec<Square>,
) {
    for (d_row, d_column) in hops {
        if let Some(to) = offset_square(from, *d_row, *d_column) {
            if !occupancy.holds_friend_of(to, piece) {
                out.push(to);
            }
        }
    }
}
