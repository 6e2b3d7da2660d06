//! Core identity types shared by every layer of the engine.
//!
//! Squares are row-major indices over the 8x8 grid with row 0 at the second
//! player's home edge. Pieces are addressed by a stable `PieceId` for the whole
//! game; their kind lives in a per-position table so promotions keep the id.

pub use crate::game_state::chessboard::Chessboard;
pub use crate::game_state::position_state::{MoveFlags, PositionState};

/// Board square index (`0..=63`), `row * 8 + column`.
pub type Square = u8;

/// Stable piece identity (`0..=31`). `0..=15` are Light, `16..=31` are Dark.
pub type PieceId = u8;

pub const BOARD_SQUARES: usize = 64;
pub const PIECE_COUNT: usize = 32;
pub const PIECES_PER_SIDE: usize = 16;

/// Side to move. `Light` moves first and starts on rows 6-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// First `PieceId` of this side's sixteen.
    #[inline]
    pub const fn id_offset(self) -> PieceId {
        match self {
            Color::Light => 0,
            Color::Dark => PIECES_PER_SIDE as PieceId,
        }
    }

    #[inline]
    pub const fn of_piece(id: PieceId) -> Self {
        if (id as usize) < PIECES_PER_SIDE {
            Color::Light
        } else {
            Color::Dark
        }
    }

    /// All sixteen ids belonging to this side, in ascending order.
    #[inline]
    pub fn piece_ids(self) -> std::ops::Range<PieceId> {
        let start = self.id_offset();
        start..start + PIECES_PER_SIDE as PieceId
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// Row on which this side's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Row holding this side's king and rooks at the start.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

/// Piece kind (color is carried by the `PieceId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Kind a piece starts the game as, from its id alone.
    #[inline]
    pub const fn initial_for(id: PieceId) -> Self {
        match id as usize % PIECES_PER_SIDE {
            0..=7 => PieceKind::Pawn,
            8 | 9 => PieceKind::Rook,
            10 | 11 => PieceKind::Knight,
            12 | 13 => PieceKind::Bishop,
            14 => PieceKind::Queen,
            _ => PieceKind::King,
        }
    }

    /// Kinds a pawn may promote to.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// A move is a piece and its destination; side effects are derived from the
/// position it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: PieceId,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(piece: PieceId, to: Square) -> Self {
        Self { piece, to }
    }
}

#[inline]
pub const fn row_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn column_of(square: Square) -> u8 {
    square % 8
}

/// Square reached from `square` by a row/column delta, or `None` off the board.
#[inline]
pub const fn offset_square(square: Square, d_row: i8, d_column: i8) -> Option<Square> {
    let row = (square / 8) as i8 + d_row;
    let column = (square % 8) as i8 + d_column;
    if row < 0 || row > 7 || column < 0 || column > 7 {
        None
    } else {
        Some((row * 8 + column) as Square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_ids_split_by_side() {
        assert_eq!(Color::of_piece(15), Color::Light);
        assert_eq!(Color::of_piece(16), Color::Dark);
        assert_eq!(Color::Dark.piece_ids().count(), 16);
        assert_eq!(Color::Dark.piece_ids().next(), Some(16));
    }

    #[test]
    fn initial_kinds_follow_sub_ranges() {
        assert_eq!(PieceKind::initial_for(3), PieceKind::Pawn);
        assert_eq!(PieceKind::initial_for(25), PieceKind::Rook);
        assert_eq!(PieceKind::initial_for(26), PieceKind::Knight);
        assert_eq!(PieceKind::initial_for(13), PieceKind::Bishop);
        assert_eq!(PieceKind::initial_for(30), PieceKind::Queen);
        assert_eq!(PieceKind::initial_for(31), PieceKind::King);
    }

    #[test]
    fn offset_square_detects_wrap() {
        assert_eq!(offset_square(7, 0, 1), None);
        assert_eq!(offset_square(8, 0, -1), None);
        assert_eq!(offset_square(0, 1, 1), Some(9));
        assert_eq!(offset_square(63, 1, 0), None);
    }
}
