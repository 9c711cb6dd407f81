use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Square};
use crate::moves::sliding::{slider_reaches, SlideLines};

#[inline]
pub fn rook_attacks_square(board: &Board, from: Square, target: Square) -> bool {
    slider_reaches(board, from, target, SlideLines::Orthogonal)
}

#[inline]
pub fn is_rook_move_legal(board: &Board, rook: &Piece, to: Square) -> bool {
    rook_attacks_square(board, rook.square, to)
}
