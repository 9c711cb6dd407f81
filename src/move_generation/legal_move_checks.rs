//! Attack and check detection.
//!
//! Attack detection is one ply deep: a square is attacked when some enemy
//! piece could capture onto it, regardless of whether that capture would be
//! legal for the enemy.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::moves::piece_moves::piece_attacks_square;

/// True if any piece of `defending_color.opposite()` attacks `square`.
pub fn square_is_attacked(board: &Board, square: Square, defending_color: Color) -> bool {
    board
        .pieces(defending_color.opposite())
        .any(|attacker| piece_attacks_square(board, attacker, square))
}

/// A missing king counts as being in check so a corrupt position ends the game
/// instead of letting it continue.
pub fn king_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => square_is_attacked(board, king, color),
        None => true,
    }
}

pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    board
        .pieces(attacker_color)
        .filter(|attacker| piece_attacks_square(board, attacker, square))
        .map(|attacker| (attacker.square, attacker.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::initial_board;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn nobody_is_in_check_at_start() {
        let board = initial_board();
        assert!(!king_in_check(&board, Color::White));
        assert!(!king_in_check(&board, Color::Black));
        assert!(square_is_attacked(&board, sq("f3"), Color::Black));
        assert!(!square_is_attacked(&board, sq("e4"), Color::Black));
    }

    #[test]
    fn missing_king_reads_as_check() {
        let mut board = initial_board();
        board.remove(sq("e8"));
        assert!(king_in_check(&board, Color::Black));
        assert!(!king_in_check(&board, Color::White));
    }

    #[test]
    fn attackers_are_listed_with_their_kind() {
        let board = Board::from_diagram(
            "....k...
             ........
             ........
             ........
             ....r...
             ...n....
             ........
             ....K...",
        )
        .expect("diagram");
        assert!(king_in_check(&board, Color::White));
        let attackers = attackers_to_square(&board, sq("e1"), Color::Black);
        assert_eq!(
            attackers,
            vec![(sq("d3"), PieceKind::Knight), (sq("e4"), PieceKind::Rook)]
        );
    }
}
