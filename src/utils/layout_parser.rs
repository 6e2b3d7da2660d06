//! Board-layout text to `Chessboard` and back.
//!
//! Uses the piece-placement field of Forsyth-Edwards Notation: eight rows
//! separated by `/`, first row = row 0 (Dark's home), uppercase = Light.
//! Any fields after the first whitespace are ignored.
//!
//! Stable ids are recovered in three passes: a piece standing on an id's
//! starting square takes that id, any other piece takes the first free id of
//! its kind, and surplus knights, bishops, rooks and queens take a free pawn
//! id as promoted pieces.

use crate::chess_errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{king_id, STARTING_SQUARES};
use crate::game_state::chess_types::*;
use crate::game_state::position_state::initial_kinds;

pub fn parse_layout(layout: &str) -> EngineResult<Chessboard> {
    let board_part = layout
        .split_whitespace()
        .next()
        .ok_or_else(|| invalid("missing board layout"))?;
    let pieces = parse_rows(board_part)?;

    let mut grid: [Option<PieceId>; BOARD_SQUARES] = [None; BOARD_SQUARES];
    let mut kinds = initial_kinds();
    let mut taken = [false; PIECE_COUNT];
    let mut pending = Vec::new();

    for (square, color, kind) in pieces {
        let home_id = color.piece_ids().find(|id| {
            STARTING_SQUARES[*id as usize] == square && PieceKind::initial_for(*id) == kind
        });
        match home_id {
            Some(id) => {
                taken[id as usize] = true;
                grid[square as usize] = Some(id);
            }
            None => pending.push((square, color, kind)),
        }
    }

    let mut promoted = Vec::new();
    for (square, color, kind) in pending {
        let free = color
            .piece_ids()
            .find(|id| !taken[*id as usize] && PieceKind::initial_for(*id) == kind);
        match free {
            Some(id) => {
                taken[id as usize] = true;
                grid[square as usize] = Some(id);
            }
            None if kind.is_promotion_target() => promoted.push((square, color, kind)),
            None => return Err(invalid(format!("too many {color:?} {kind:?}s"))),
        }
    }

    for (square, color, kind) in promoted {
        let id = color
            .piece_ids()
            .find(|id| !taken[*id as usize] && PieceKind::initial_for(*id) == PieceKind::Pawn)
            .ok_or_else(|| invalid(format!("too many {color:?} pieces")))?;
        taken[id as usize] = true;
        kinds[id as usize] = kind;
        grid[square as usize] = Some(id);
    }

    let board = Chessboard::from_parts(grid, kinds, MoveFlags::new());
    let placement = board.placement();
    for color in [Color::Light, Color::Dark] {
        if placement[king_id(color) as usize].is_none() {
            return Err(invalid(format!("{color:?} king is missing")));
        }
    }

    let mut flags = MoveFlags::new();
    flags.mark_displaced(&placement);
    Ok(Chessboard::from_parts(grid, kinds, flags))
}

/// Piece-placement text for `board`, the inverse of [`parse_layout`] up to ids.
pub fn format_layout(board: &Chessboard) -> String {
    let mut out = String::with_capacity(72);
    for row in 0..8u8 {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0u8;
        for column in 0..8u8 {
            match board.piece_at(row * 8 + column) {
                Some(id) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(layout_char(Color::of_piece(id), board.kind_of(id)));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
    }
    out
}

fn parse_rows(board_part: &str) -> EngineResult<Vec<(Square, Color, PieceKind)>> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != 8 {
        return Err(invalid("board layout must contain 8 rows"));
    }

    let mut pieces = Vec::with_capacity(PIECE_COUNT);
    for (row, text) in rows.iter().enumerate() {
        let mut column = 0usize;
        for ch in text.chars() {
            if let Some(skip) = ch.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                column += skip as usize;
                continue;
            }
            let (color, kind) =
                piece_from_char(ch).ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            if column >= 8 {
                return Err(invalid(format!("row {row} has too many columns")));
            }
            if kind == PieceKind::Pawn && (row == 0 || row == 7) {
                return Err(invalid(format!("pawn on back row {row}")));
            }
            pieces.push(((row * 8 + column) as Square, color, kind));
            column += 1;
        }
        if column != 8 {
            return Err(invalid(format!("row {row} does not sum to 8 columns")));
        }
    }
    Ok(pieces)
}

fn piece_from_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some((color, kind))
}

fn layout_char(color: Color, kind: PieceKind) -> char {
    let ch = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match color {
        Color::Light => ch.to_ascii_uppercase(),
        Color::Dark => ch,
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidLayout(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_LAYOUT;

    #[test]
    fn starting_layout_matches_new_game() {
        let board = parse_layout(STARTING_LAYOUT).unwrap();
        assert_eq!(board, Chessboard::new_game());
        assert_eq!(format_layout(&board), STARTING_LAYOUT);
    }

    #[test]
    fn trailing_fields_are_ignored() {
        let board = parse_layout(&format!("{STARTING_LAYOUT} w KQkq - 0 1")).unwrap();
        assert_eq!(board, Chessboard::new_game());
    }

    #[test]
    fn displaced_pieces_keep_kind_and_count_as_moved() {
        let board = parse_layout("r3k2r/8/8/8/4P3/8/8/4K3").unwrap();
        assert_eq!(board.piece_at(0), Some(24));
        assert_eq!(board.piece_at(7), Some(25));
        assert!(!board.flags().has_moved(31));
        let pawn = board.piece_at(36).unwrap();
        assert_eq!(pawn, 0);
        assert!(board.flags().has_moved(pawn));
        assert_eq!(format_layout(&board), "r3k2r/8/8/8/4P3/8/8/4K3");
    }

    #[test]
    fn surplus_queen_takes_a_pawn_id() {
        let board = parse_layout("4k3/8/8/8/8/8/8/Q2QK3").unwrap();
        assert_eq!(board.piece_at(59), Some(14));
        let extra = board.piece_at(56).unwrap();
        assert!(extra < 8);
        assert_eq!(board.kind_of(extra), PieceKind::Queen);
        let position = board.snapshot().unwrap();
        assert_eq!(position.kind_of(extra), PieceKind::Queen);
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        for layout in [
            "",
            "8/8/8/8/8/8/8",
            "4k3/8/8/8/8/8/8/4K4",
            "4k3/8/8/8/8/8/8/3X4",
            "8/8/8/8/8/8/8/4K3",
            "4k3/8/8/8/8/8/8/3KK3",
            "P3k3/8/8/8/8/8/8/4K3",
        ] {
            assert!(
                matches!(parse_layout(layout), Err(EngineError::InvalidLayout(_))),
                "{layout:?} should be rejected"
            );
        }
    }
}
