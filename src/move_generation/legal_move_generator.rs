//! Legal move generation.
//!
//! Every own piece is tried against every destination square; a candidate
//! survives if it is geometrically legal and, played on a board copy, does not
//! leave the mover's king in check. Output order is origin scan order a1..h8,
//! then destination scan order.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, Piece, Square};
use crate::move_generation::legal_move_apply::{make_move, DEFAULT_PROMOTION};
use crate::move_generation::legal_move_checks::king_in_check;
use crate::moves::piece_moves::piece_move_is_legal;

#[inline]
fn is_check_safe(board: &Board, mv: Move, color: Color) -> bool {
    let mut scratch = *board;
    make_move(&mut scratch, mv, DEFAULT_PROMOTION).is_some() && !king_in_check(&scratch, color)
}

fn push_piece_moves(board: &Board, piece: &Piece, last_move: Option<Move>, out: &mut Vec<Move>) {
    for to in Square::all() {
        if to == piece.square || board.is_occupied_by(to, piece.color) {
            continue;
        }
        if !piece_move_is_legal(board, piece, to, last_move) {
            continue;
        }
        let mv = Move::new(piece.square, to);
        if is_check_safe(board, mv, piece.color) {
            out.push(mv);
        }
    }
}

pub fn legal_moves(board: &Board, color: Color, last_move: Option<Move>) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for piece in board.pieces(color) {
        push_piece_moves(board, piece, last_move, &mut moves);
    }
    moves
}

/// Legal moves of the piece on `from`, empty if the square is empty.
pub fn legal_moves_from(board: &Board, from: Square, last_move: Option<Move>) -> Vec<Move> {
    let mut moves = Vec::new();
    if let Some(piece) = board.piece_at(from) {
        push_piece_moves(board, piece, last_move, &mut moves);
    }
    moves
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(board: &Board, color: Color, last_move: Option<Move>) -> bool {
    board.pieces(color).any(|piece| {
        Square::all().any(|to| {
            to != piece.square
                && !board.is_occupied_by(to, piece.color)
                && piece_move_is_legal(board, piece, to, last_move)
                && is_check_safe(board, Move::new(piece.square, to), color)
        })
    })
}
