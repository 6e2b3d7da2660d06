//! Static position evaluation.
//!
//! Search delegates leaf scoring to the `BoardScorer` trait so alternate
//! heuristics can be swapped without touching search code. `StandardScorer`
//! sums material, capture threats and piece placement, all measured in tenths
//! of a pawn-unit.

use crate::game_state::chess_types::*;
use crate::game_state::position_state::PositionState;
use crate::move_generation::move_generator::generate_destinations_with;

pub trait BoardScorer: Send + Sync {
    /// Score of `position`; higher favours `perspective`.
    fn score(&self, position: &PositionState, perspective: Color) -> i32;
}

// Placement tables, row 0 = Dark's home row. Light reads them mirrored by row.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -10,  5,  5,  5,  5,  5,  0,-10,
      0,  0,  5,  5,  5,  5,  0, -5,
     -5,  0,  5,  5,  5,  5,  0, -5,
    -10,  0,  5,  5,  5,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
     20, 50, 10,  0,  0, 10, 50, 20,
     20, 20,  0,  0,  0,  0, 20, 20,
    -10,-20,-20,-20,-20,-20,-20,-10,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 25,
            PieceKind::Knight => 81,
            PieceKind::Bishop => 83,
            PieceKind::Rook => 127,
            PieceKind::Queen => 194,
            PieceKind::King => 5000,
        }
    }

    /// Placement bonus for a piece of `kind` and `color` standing on `square`.
    #[inline]
    pub fn placement_value(kind: PieceKind, color: Color, square: Square) -> i32 {
        let row = match color {
            Color::Dark => row_of(square),
            Color::Light => 7 - row_of(square),
        };
        let table = match kind {
            PieceKind::Pawn => &PAWN_TABLE,
            PieceKind::Knight => &KNIGHT_TABLE,
            PieceKind::Bishop => &BISHOP_TABLE,
            PieceKind::Rook => &ROOK_TABLE,
            PieceKind::Queen => &QUEEN_TABLE,
            PieceKind::King => &KING_TABLE,
        };
        table[(row * 8 + column_of(square)) as usize]
    }

    fn material_dark_minus_light(position: &PositionState) -> i32 {
        let mut score = 0;
        for color in [Color::Light, Color::Dark] {
            let side: i32 = position
                .pieces(color)
                .map(|(id, _)| Self::piece_value(position.kind_of(id)))
                .sum();
            score += signed(color, side);
        }
        score
    }

    /// Value of every enemy piece sitting on one of a piece's destinations.
    fn capture_threats_dark_minus_light(position: &PositionState) -> i32 {
        let occupancy = position.occupancy();
        let mut destinations = Vec::with_capacity(28);
        let mut score = 0;

        for color in [Color::Light, Color::Dark] {
            let mut side = 0;
            for piece in color.piece_ids() {
                destinations.clear();
                generate_destinations_with(position, &occupancy, piece, &mut destinations);
                for to in destinations.iter().copied() {
                    if let Some(victim) = occupancy.piece_at(to) {
                        side += Self::piece_value(position.kind_of(victim));
                    }
                }
            }
            score += signed(color, side);
        }
        score
    }

    fn placement_dark_minus_light(position: &PositionState) -> i32 {
        let mut score = 0;
        for color in [Color::Light, Color::Dark] {
            let side: i32 = position
                .pieces(color)
                .map(|(id, square)| Self::placement_value(position.kind_of(id), color, square))
                .sum();
            score += signed(color, side);
        }
        score
    }
}

#[inline]
fn signed(color: Color, value: i32) -> i32 {
    match color {
        Color::Dark => value,
        Color::Light => -value,
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, position: &PositionState, perspective: Color) -> i32 {
        let dark_minus_light = Self::material_dark_minus_light(position)
            + Self::capture_threats_dark_minus_light(position)
            + Self::placement_dark_minus_light(position);
        signed(perspective, dark_minus_light)
    }
}
