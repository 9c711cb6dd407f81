use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Square};
use crate::moves::sliding::{slider_reaches, SlideLines};

#[inline]
pub fn queen_attacks_square(board: &Board, from: Square, target: Square) -> bool {
    slider_reaches(board, from, target, SlideLines::Both)
}

#[inline]
pub fn is_queen_move_legal(board: &Board, queen: &Piece, to: Square) -> bool {
    queen_attacks_square(board, queen.square, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn queen_on_empty_board_reaches_twenty_seven_squares_from_d4() {
        let mut board = Board::empty();
        board
            .place(PieceKind::Queen, Color::White, sq("d4"))
            .expect("place queen");
        let queen = *board.piece_at(sq("d4")).expect("queen");
        let reachable = Square::all()
            .filter(|&to| is_queen_move_legal(&board, &queen, to))
            .count();
        assert_eq!(reachable, 27);
    }
}
