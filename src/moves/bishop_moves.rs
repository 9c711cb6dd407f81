use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Square};
use crate::moves::sliding::{slider_reaches, SlideLines};

#[inline]
pub fn bishop_attacks_square(board: &Board, from: Square, target: Square) -> bool {
    slider_reaches(board, from, target, SlideLines::Diagonal)
}

#[inline]
pub fn is_bishop_move_legal(board: &Board, bishop: &Piece, to: Square) -> bool {
    bishop_attacks_square(board, bishop.square, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn bishop_stops_at_first_blocker() {
        let mut board = Board::empty();
        board
            .place(PieceKind::Bishop, Color::Black, sq("c8"))
            .expect("place bishop");
        board
            .place(PieceKind::Pawn, Color::White, sq("e6"))
            .expect("place pawn");
        let bishop = *board.piece_at(sq("c8")).expect("bishop");
        assert!(is_bishop_move_legal(&board, &bishop, sq("e6")));
        assert!(!is_bishop_move_legal(&board, &bishop, sq("f5")));
        assert!(is_bishop_move_legal(&board, &bishop, sq("a6")));
        assert!(!is_bishop_move_legal(&board, &bishop, sq("c6")));
    }
}
