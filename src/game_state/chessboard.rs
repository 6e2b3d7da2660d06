//! Square-indexed board held by the interactive layer.
//!
//! `Chessboard` answers "what stands on this square" directly and applies
//! moves with their full side effects (en passant, castling, promotion
//! choice). Human moves are validated here, including the castling rules the
//! search generator skips. The engine never sees this type: it receives a
//! `PositionState` produced by `snapshot`.

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{castling_rook_move, king_id, STARTING_SQUARES};
use crate::game_state::chess_types::*;
use crate::game_state::position_state::initial_kinds;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::piece_destinations;

/// Outcome of the position for the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chessboard {
    grid: [Option<PieceId>; BOARD_SQUARES],
    kinds: [PieceKind; PIECE_COUNT],
    flags: MoveFlags,
}

impl Default for Chessboard {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Chessboard {
    pub fn new_game() -> Self {
        let mut grid = [None; BOARD_SQUARES];
        for (id, square) in STARTING_SQUARES.iter().enumerate() {
            grid[*square as usize] = Some(id as PieceId);
        }
        Self {
            grid,
            kinds: initial_kinds(),
            flags: MoveFlags::new(),
        }
    }

    pub(crate) fn from_parts(
        grid: [Option<PieceId>; BOARD_SQUARES],
        kinds: [PieceKind; PIECE_COUNT],
        flags: MoveFlags,
    ) -> Self {
        Self { grid, kinds, flags }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.grid[square as usize]
    }

    pub fn square_of(&self, piece: PieceId) -> Option<Square> {
        self.grid
            .iter()
            .position(|slot| *slot == Some(piece))
            .map(|square| square as Square)
    }

    #[inline]
    pub fn kind_of(&self, piece: PieceId) -> PieceKind {
        self.kinds[piece as usize]
    }

    #[inline]
    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    /// Piece-indexed view of the grid.
    pub fn placement(&self) -> [Option<Square>; PIECE_COUNT] {
        let mut placement = [None; PIECE_COUNT];
        for (square, slot) in self.grid.iter().enumerate() {
            if let Some(id) = slot {
                placement[*id as usize] = Some(square as Square);
            }
        }
        placement
    }

    /// Validated compact snapshot for the engine.
    ///
    /// Pawns, rooks and kings found off their home squares are marked as
    /// moved even if the board's own flags missed it.
    pub fn snapshot(&self) -> EngineResult<PositionState> {
        let placement = self.placement();
        let mut flags = self.flags;
        flags.mark_displaced(&placement);
        PositionState::from_placement(placement, self.kinds, flags)
    }

    fn position(&self) -> PositionState {
        PositionState::from_parts(self.placement(), self.kinds, self.flags)
    }

    /// Diagonal captures of a pawn that just double-stepped past `piece`.
    pub fn en_passant_destinations(&self, piece: PieceId) -> Vec<Square> {
        let mut out = Vec::new();
        let Some(from) = self.square_of(piece) else {
            return out;
        };
        if self.kind_of(piece) != PieceKind::Pawn {
            return out;
        }
        let color = Color::of_piece(piece);
        for d_column in [-1, 1] {
            let Some(beside) = offset_square(from, 0, d_column) else {
                continue;
            };
            let Some(victim) = self.piece_at(beside) else {
                continue;
            };
            let eligible = Color::of_piece(victim) != color
                && self.kind_of(victim) == PieceKind::Pawn
                && self.flags.just_double_stepped(victim);
            if !eligible {
                continue;
            }
            if let Some(to) = offset_square(from, color.forward(), d_column) {
                if self.piece_at(to).is_none() {
                    out.push(to);
                }
            }
        }
        out
    }

    /// Destinations a human may choose for `piece`: pseudo-legal moves plus
    /// en passant, minus anything that leaves the own king attacked and any
    /// castling out of or through check.
    pub fn legal_destinations(&self, piece: PieceId) -> Vec<Square> {
        let Some(from) = self.square_of(piece) else {
            return Vec::new();
        };
        let color = Color::of_piece(piece);
        let position = self.position();
        let mut candidates = piece_destinations(&position, piece);
        candidates.extend(self.en_passant_destinations(piece));

        let castling_king = self.kind_of(piece) == PieceKind::King;
        candidates.retain(|to| {
            if castling_king && from.abs_diff(*to) == 2 && row_of(from) == row_of(*to) {
                let mut passing = *self;
                passing.relocate(piece, (from + *to) / 2, PieceKind::Queen);
                if is_king_in_check(&position, color) || is_king_in_check(&passing.position(), color) {
                    return false;
                }
            }
            let mut probe = *self;
            probe.relocate(piece, *to, PieceKind::Queen);
            !is_king_in_check(&probe.position(), color)
        });
        candidates
    }

    /// Applies a human move after validating it.
    ///
    /// `promotion` picks the kind for a pawn reaching the far row (Queen when
    /// `None`). Returns the captured piece, if any.
    pub fn apply_move(
        &mut self,
        piece: PieceId,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> EngineResult<Option<PieceId>> {
        let promotion = promotion.unwrap_or(PieceKind::Queen);
        if !promotion.is_promotion_target() || !self.legal_destinations(piece).contains(&to) {
            return Err(EngineError::IllegalMove { piece, to });
        }
        Ok(self.relocate(piece, to, promotion))
    }

    /// Applies a move chosen by the engine.
    ///
    /// Only pseudo-legality is checked, matching what the search generates;
    /// a pawn reaching the far row becomes a Queen.
    pub fn apply_engine_move(&mut self, mv: Move) -> EngineResult<Option<PieceId>> {
        if self.square_of(mv.piece).is_none()
            || !piece_destinations(&self.position(), mv.piece).contains(&mv.to)
        {
            return Err(EngineError::IllegalMove {
                piece: mv.piece,
                to: mv.to,
            });
        }
        Ok(self.relocate(mv.piece, mv.to, PieceKind::Queen))
    }

    /// Lowest-id opposing piece attacking `color`'s king.
    pub fn checking_piece(&self, color: Color) -> Option<PieceId> {
        let king_square = self.square_of(king_id(color))?;
        let position = self.position();
        color
            .opposite()
            .piece_ids()
            .find(|id| piece_destinations(&position, *id).contains(&king_square))
    }

    pub fn status(&self, color: Color) -> GameStatus {
        let in_check = is_king_in_check(&self.position(), color);
        let can_move = color
            .piece_ids()
            .any(|id| !self.legal_destinations(id).is_empty());
        match (in_check, can_move) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Ongoing,
        }
    }

    /// Moves `piece` with every side effect and no validation.
    fn relocate(&mut self, piece: PieceId, to: Square, promotion: PieceKind) -> Option<PieceId> {
        let from = self.square_of(piece)?;
        let kind = self.kind_of(piece);

        let mut captured = self.grid[to as usize].take();
        if kind == PieceKind::Pawn && captured.is_none() && column_of(from) != column_of(to) {
            let passed = row_of(from) * 8 + column_of(to);
            captured = self.grid[passed as usize].take();
        }
        self.grid[from as usize] = None;
        self.grid[to as usize] = Some(piece);

        if kind == PieceKind::King {
            if let Some((rook, rook_from, rook_to)) = castling_rook_move(piece, from, to) {
                if self.grid[rook_from as usize] == Some(rook) {
                    self.grid[rook_from as usize] = None;
                    self.grid[rook_to as usize] = Some(rook);
                    self.flags.mark_moved(rook);
                }
            }
        }
        if kind == PieceKind::Pawn && row_of(to) == Color::of_piece(piece).promotion_row() {
            self.kinds[piece as usize] = promotion;
        }

        let double_step = kind == PieceKind::Pawn && from.abs_diff(to) == 16;
        self.flags.record_move(piece, double_step);
        captured
    }
}
