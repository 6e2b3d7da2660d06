//! Terminal-oriented Unicode board renderer.
//!
//! Draws a `PositionState` with row 0 (Dark's home, rank 8) at the top, for
//! test failure messages and diagnostics in text environments.

use crate::game_state::chess_types::*;

/// Render the position to a Unicode string for terminal output.
pub fn render_position(position: &PositionState) -> String {
    let occupancy = position.occupancy();
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        out.push(rank);
        out.push(' ');

        for column in 0..8u8 {
            match occupancy.piece_at(row * 8 + column) {
                Some(id) => out.push(piece_to_unicode(Color::of_piece(id), position.kind_of(id))),
                None => out.push('·'),
            }

            if column < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
