//! Compact piece-indexed position used by the search.
//!
//! `PositionState` maps every `PieceId` to its square (or to "captured") and
//! carries the move-eligibility flags that gate double steps and castling.
//! It is `Copy`: every tree node owns an independent snapshot, and
//! `with_move` is the only way to derive one position from another.

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{castling_rook_move, king_id, STARTING_SQUARES};
use crate::game_state::chess_types::*;

/// Per-piece move-eligibility bits.
///
/// `moved` is one-way: once set for a piece it is never cleared. The
/// `double_step` bit marks a pawn whose most recent move was a two-row
/// advance and only survives until the next move by anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags {
    moved: u32,
    double_step: u32,
}

impl MoveFlags {
    #[inline]
    pub const fn new() -> Self {
        Self {
            moved: 0,
            double_step: 0,
        }
    }

    #[inline]
    pub const fn has_moved(self, piece: PieceId) -> bool {
        self.moved & (1u32 << piece) != 0
    }

    #[inline]
    pub const fn just_double_stepped(self, piece: PieceId) -> bool {
        self.double_step & (1u32 << piece) != 0
    }

    #[inline]
    pub fn mark_moved(&mut self, piece: PieceId) {
        self.moved |= 1u32 << piece;
    }

    /// Records a move by `piece`, ending every other pawn's en passant window.
    #[inline]
    pub fn record_move(&mut self, piece: PieceId, double_step: bool) {
        self.moved |= 1u32 << piece;
        self.double_step = if double_step { 1u32 << piece } else { 0 };
    }

    /// Marks every pawn, rook and king that is off its starting square as moved.
    pub fn mark_displaced(&mut self, placement: &[Option<Square>; PIECE_COUNT]) {
        for id in 0..PIECE_COUNT as PieceId {
            let tracked = matches!(
                PieceKind::initial_for(id),
                PieceKind::Pawn | PieceKind::Rook | PieceKind::King
            );
            if tracked && placement[id as usize] != Some(STARTING_SQUARES[id as usize]) {
                self.mark_moved(id);
            }
        }
    }
}

/// Square-indexed lookup built on demand from a `PositionState`.
#[derive(Debug, Clone, Copy)]
pub struct Occupancy {
    squares: [Option<PieceId>; BOARD_SQUARES],
}

impl Occupancy {
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square as usize].is_none()
    }

    /// True when `square` holds a piece of the side opposite to `mover`.
    #[inline]
    pub fn holds_enemy_of(&self, square: Square, mover: PieceId) -> bool {
        self.squares[square as usize]
            .is_some_and(|other| Color::of_piece(other) != Color::of_piece(mover))
    }

    /// True when `square` holds a piece of the same side as `mover`.
    #[inline]
    pub fn holds_friend_of(&self, square: Square, mover: PieceId) -> bool {
        self.squares[square as usize]
            .is_some_and(|other| Color::of_piece(other) == Color::of_piece(mover))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionState {
    placement: [Option<Square>; PIECE_COUNT],
    kinds: [PieceKind; PIECE_COUNT],
    flags: MoveFlags,
}

impl Default for PositionState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl PositionState {
    /// Standard starting layout with no piece moved.
    pub fn new_game() -> Self {
        let mut placement = [None; PIECE_COUNT];
        for (slot, square) in placement.iter_mut().zip(STARTING_SQUARES) {
            *slot = Some(square);
        }
        Self {
            placement,
            kinds: initial_kinds(),
            flags: MoveFlags::new(),
        }
    }

    /// Builds a snapshot from raw placement, kinds and flags, rejecting
    /// inconsistent input instead of letting the search run on it.
    pub fn from_placement(
        placement: [Option<Square>; PIECE_COUNT],
        kinds: [PieceKind; PIECE_COUNT],
        flags: MoveFlags,
    ) -> EngineResult<Self> {
        let mut seen: [Option<PieceId>; BOARD_SQUARES] = [None; BOARD_SQUARES];

        for (id, slot) in placement.iter().enumerate() {
            let id = id as PieceId;
            let Some(square) = *slot else {
                continue;
            };
            if square as usize >= BOARD_SQUARES {
                return Err(EngineError::MalformedSnapshot(format!(
                    "piece {id} placed on square {square}"
                )));
            }
            if let Some(other) = seen[square as usize] {
                return Err(EngineError::MalformedSnapshot(format!(
                    "pieces {other} and {id} share square {square}"
                )));
            }
            seen[square as usize] = Some(id);
        }

        for (id, kind) in kinds.iter().enumerate() {
            let id = id as PieceId;
            let initial = PieceKind::initial_for(id);
            let valid = *kind == initial
                || (initial == PieceKind::Pawn && kind.is_promotion_target());
            if !valid {
                return Err(EngineError::MalformedSnapshot(format!(
                    "piece {id} cannot be a {kind:?}"
                )));
            }
        }

        for color in [Color::Light, Color::Dark] {
            if placement[king_id(color) as usize].is_none() {
                return Err(EngineError::MalformedSnapshot(format!(
                    "{color:?} king is missing"
                )));
            }
        }

        Ok(Self {
            placement,
            kinds,
            flags,
        })
    }

    /// Unvalidated constructor for callers that already hold a consistent grid.
    #[inline]
    pub(crate) fn from_parts(
        placement: [Option<Square>; PIECE_COUNT],
        kinds: [PieceKind; PIECE_COUNT],
        flags: MoveFlags,
    ) -> Self {
        Self {
            placement,
            kinds,
            flags,
        }
    }

    /// Independent child position reached by moving `piece` to `to`.
    ///
    /// Resolves a capture on `to`, relocates the rook of a two-column king
    /// move, promotes a pawn reaching the far row to a queen, and updates the
    /// flags. Does not check the mover's own king safety.
    pub fn with_move(&self, piece: PieceId, to: Square) -> Self {
        let mut child = *self;
        let Some(from) = self.placement[piece as usize] else {
            return child;
        };

        if let Some(victim) = self.piece_at(to) {
            child.placement[victim as usize] = None;
        }
        child.placement[piece as usize] = Some(to);

        let kind = self.kinds[piece as usize];
        let mut double_step = false;
        match kind {
            PieceKind::King => {
                if let Some((rook, rook_from, rook_to)) = castling_rook_move(piece, from, to) {
                    if self.placement[rook as usize] == Some(rook_from) {
                        child.placement[rook as usize] = Some(rook_to);
                        child.flags.mark_moved(rook);
                    }
                }
            }
            PieceKind::Pawn => {
                double_step = from.abs_diff(to) == 16;
                if row_of(to) == Color::of_piece(piece).promotion_row() {
                    child.kinds[piece as usize] = PieceKind::Queen;
                }
            }
            _ => {}
        }

        child.flags.record_move(piece, double_step);
        child
    }

    #[inline]
    pub fn square_of(&self, piece: PieceId) -> Option<Square> {
        self.placement[piece as usize]
    }

    #[inline]
    pub fn is_on_board(&self, piece: PieceId) -> bool {
        self.placement[piece as usize].is_some()
    }

    #[inline]
    pub fn kind_of(&self, piece: PieceId) -> PieceKind {
        self.kinds[piece as usize]
    }

    #[inline]
    pub fn has_moved(&self, piece: PieceId) -> bool {
        self.flags.has_moved(piece)
    }

    #[inline]
    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    #[inline]
    pub fn placement(&self) -> &[Option<Square>; PIECE_COUNT] {
        &self.placement
    }

    #[inline]
    pub fn kinds(&self) -> &[PieceKind; PIECE_COUNT] {
        &self.kinds
    }

    /// Piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.placement
            .iter()
            .position(|slot| *slot == Some(square))
            .map(|id| id as PieceId)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.placement[king_id(color) as usize]
    }

    /// Square-indexed view for generators that probe many squares.
    pub fn occupancy(&self) -> Occupancy {
        let mut squares = [None; BOARD_SQUARES];
        for (id, slot) in self.placement.iter().enumerate() {
            if let Some(square) = slot {
                squares[*square as usize] = Some(id as PieceId);
            }
        }
        Occupancy { squares }
    }

    /// `(id, square)` for every piece of `color` still on the board.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (PieceId, Square)> + '_ {
        color
            .piece_ids()
            .filter_map(move |id| self.placement[id as usize].map(|square| (id, square)))
    }
}

pub(crate) fn initial_kinds() -> [PieceKind; PIECE_COUNT] {
    let mut kinds = [PieceKind::Pawn; PIECE_COUNT];
    for (id, kind) in kinds.iter_mut().enumerate() {
        *kind = PieceKind::initial_for(id as PieceId);
    }
    kinds
}

/// Position holding only the listed pieces plus both kings on their home
/// squares (unless listed). Pieces off their starting squares count as moved.
#[cfg(test)]
pub(crate) fn sparse_position(pieces: &[(PieceId, Square)]) -> PositionState {
    let mut placement = [None; PIECE_COUNT];
    placement[king_id(Color::Light) as usize] = Some(60);
    placement[king_id(Color::Dark) as usize] = Some(4);
    for (id, square) in pieces {
        placement[*id as usize] = Some(*square);
    }
    let mut flags = MoveFlags::new();
    flags.mark_displaced(&placement);
    PositionState::from_placement(placement, initial_kinds(), flags)
        .expect("test layout should be consistent")
}
