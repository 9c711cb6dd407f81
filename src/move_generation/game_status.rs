//! Game-over detection on a bare board.
//!
//! Only rules that can be decided from the board and the last move live here:
//! checkmate, stalemate and insufficient material. The history-dependent draws
//! (fifty moves, repetition) are layered on by `GameState::status`.

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, PieceKind};
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The mated side, if any.
    pub fn loser(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner.opposite()),
            _ => None,
        }
    }

    /// Result tag in the usual "1-0" / "0-1" / "1/2-1/2" form, "*" while in progress.
    pub fn result_tag(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "*",
            GameStatus::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameStatus::Draw(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Draw(reason) => write!(f, "draw by {reason:?}"),
        }
    }
}

/// Neither side can ever deliver mate: K v K, K+minor v K, or K+B v K+B with
/// both bishops on the same square color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::with_capacity(2);
    for piece in board.all_pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => {
                if minors.len() == 2 {
                    return false;
                }
                minors.push(*piece);
            }
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }
    match minors.as_slice() {
        [] | [_] => true,
        [a, b] => {
            a.kind == PieceKind::Bishop
                && b.kind == PieceKind::Bishop
                && a.color != b.color
                && a.square.is_light() == b.square.is_light()
        }
        _ => false,
    }
}

/// Status of the position with `color` to move.
pub fn status(board: &Board, color: Color, last_move: Option<Move>) -> GameStatus {
    if !has_any_legal_move(board, color, last_move) {
        if king_in_check(board, color) {
            return GameStatus::Checkmate {
                winner: color.opposite(),
            };
        }
        return GameStatus::Draw(DrawReason::Stalemate);
    }
    if is_insufficient_material(board) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    GameStatus::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::initial_board;
    use crate::game_state::chess_types::Square;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn start_position_is_in_progress() {
        assert_eq!(status(&initial_board(), Color::White, None), GameStatus::InProgress);
    }

    #[test]
    fn back_rank_mate() {
        let board = Board::from_diagram(
            "R.....k.
             .....ppp
             ........
             ........
             ........
             ........
             ........
             ....K...",
        )
        .expect("diagram");
        let result = status(&board, Color::Black, Some(Move::new(sq("a1"), sq("a8"))));
        assert_eq!(
            result,
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        assert_eq!(result.loser(), Some(Color::Black));
        assert_eq!(result.result_tag(), "1-0");
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let board = Board::from_diagram(
            "k.......
             ..Q.....
             .K......
             ........
             ........
             ........
             ........
             ........",
        )
        .expect("diagram");
        assert_eq!(
            status(&board, Color::Black, None),
            GameStatus::Draw(DrawReason::Stalemate)
        );
    }

    #[test]
    fn insufficient_material_cases() {
        let bare = Board::from_diagram(
            "....k...
             ........
             ........
             ........
             ........
             ........
             ........
             ....K..N",
        )
        .expect("diagram");
        assert!(is_insufficient_material(&bare));

        let same_color_bishops = Board::from_diagram(
            "....kb..
             ........
             ........
             ........
             ........
             ........
             ........
             ..B.K...",
        )
        .expect("diagram");
        assert_eq!(sq("f8").is_light(), sq("c1").is_light());
        assert!(is_insufficient_material(&same_color_bishops));

        assert!(!is_insufficient_material(&initial_board()));
        assert_eq!(
            status(&bare, Color::White, None),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
    }
}
