//! Per-kind dispatch of the movement rules.
//!
//! [`is_geometrically_legal`] answers "may this piece go there" without looking
//! at the mover's own king; check safety is layered on top in
//! `move_generation`. [`piece_attacks_square`] is the capture-only view used by
//! attack detection: pawns attack diagonally, and castling never attacks.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Move, Piece, PieceKind, Square};
use crate::moves::bishop_moves::{bishop_attacks_square, is_bishop_move_legal};
use crate::moves::king_moves::{is_king_move_legal, king_attacks_square};
use crate::moves::knight_moves::{is_knight_move_legal, knight_attacks_square};
use crate::moves::pawn_moves::{is_pawn_move_legal, pawn_attacks_square};
use crate::moves::queen_moves::{is_queen_move_legal, queen_attacks_square};
use crate::moves::rook_moves::{is_rook_move_legal, rook_attacks_square};

pub fn is_geometrically_legal(
    board: &Board,
    from: Square,
    to: Square,
    last_move: Option<Move>,
) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if board.is_occupied_by(to, piece.color) {
        return false;
    }
    piece_move_is_legal(board, piece, to, last_move)
}

/// Geometry only; the caller has already ruled out own-piece destinations.
#[inline]
pub fn piece_move_is_legal(board: &Board, piece: &Piece, to: Square, last_move: Option<Move>) -> bool {
    match piece.kind {
        PieceKind::Pawn => is_pawn_move_legal(board, piece, to, last_move),
        PieceKind::Knight => is_knight_move_legal(board, piece, to),
        PieceKind::Bishop => is_bishop_move_legal(board, piece, to),
        PieceKind::Rook => is_rook_move_legal(board, piece, to),
        PieceKind::Queen => is_queen_move_legal(board, piece, to),
        PieceKind::King => is_king_move_legal(board, piece, to),
    }
}

#[inline]
pub fn piece_attacks_square(board: &Board, piece: &Piece, target: Square) -> bool {
    if piece.square == target {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_attacks_square(piece.color, piece.square, target),
        PieceKind::Knight => knight_attacks_square(piece.square, target),
        PieceKind::Bishop => bishop_attacks_square(board, piece.square, target),
        PieceKind::Rook => rook_attacks_square(board, piece.square, target),
        PieceKind::Queen => queen_attacks_square(board, piece.square, target),
        PieceKind::King => king_attacks_square(piece.square, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::initial_board;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn empty_origin_and_null_move_are_never_legal() {
        let board = initial_board();
        assert!(!is_geometrically_legal(&board, sq("e4"), sq("e5"), None));
        assert!(!is_geometrically_legal(&board, sq("e2"), sq("e2"), None));
    }

    #[test]
    fn own_piece_destination_is_rejected() {
        let board = initial_board();
        assert!(!is_geometrically_legal(&board, sq("d1"), sq("d2"), None));
        assert!(!is_geometrically_legal(&board, sq("a1"), sq("b1"), None));
        assert!(is_geometrically_legal(&board, sq("b1"), sq("c3"), None));
    }

    #[test]
    fn pawn_push_does_not_count_as_attack() {
        let board = initial_board();
        let pawn = *board.piece_at(sq("e2")).expect("pawn");
        assert!(!piece_attacks_square(&board, &pawn, sq("e3")));
        assert!(piece_attacks_square(&board, &pawn, sq("f3")));
    }
}
