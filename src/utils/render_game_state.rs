//! Terminal board renderers.
//!
//! `render_board_diagram` writes the plain-letter diagram that
//! `Board::from_diagram` reads back. `render_game_state` is the decorated
//! console view with coordinates, Unicode pieces and a status line.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// Eight lines, rank 8 first, FEN letters and `.` for empty squares.
pub fn render_board_diagram(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..8u8).rev() {
        for file in 0..8u8 {
            let ch = Square::new(file, rank)
                .ok()
                .and_then(|square| board.piece_at(square))
                .map_or('.', |piece| piece.symbol());
            out.push(ch);
        }
        if rank > 0 {
            out.push('\n');
        }
    }
    out
}

/// Render the board to a Unicode string for terminal output.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let piece = Square::new(file, rank).ok().and_then(|sq| board.piece_at(sq));
            match piece {
                Some(piece) => out.push(piece_to_unicode(piece.color, piece.kind)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Board view followed by the move counter, side to move and game status.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = render_board(game_state.board());
    out.push('\n');
    out.push_str(&format!(
        "move {}, {} to play, {}",
        game_state.fullmove_number(),
        game_state.side_to_move(),
        game_state.status()
    ));
    if let Some(last) = game_state.move_log().last() {
        out.push_str(&format!(" (last: {last})"));
    }
    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
