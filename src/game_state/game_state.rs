//! The canonical game: board plus turn, clocks and history.
//!
//! `GameState` is the only mutable game object and is driven by the player
//! loop. Search never touches it; engines copy its board and last move out.

use tracing::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::{initial_board, Board};
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::move_generation::game_status::{status, DrawReason, GameStatus};
use crate::move_generation::legal_move_apply::{apply_move_with_promotion, DEFAULT_PROMOTION};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::MoveOutcome;

/// Compact position identity for repetition detection. Has-moved flags only
/// count for kings and rooks, where they stand in for castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    cells: [u8; 64],
    side_to_move: Color,
}

impl PositionKey {
    pub fn new(board: &Board, side_to_move: Color) -> Self {
        let mut cells = [0u8; 64];
        for piece in board.all_pieces() {
            let castling_piece = matches!(piece.kind, PieceKind::King | PieceKind::Rook);
            let unmoved = if castling_piece && !piece.has_moved { 12 } else { 0 };
            cells[piece.square.index()] =
                1 + (piece.kind.index() * 2 + piece.color.index()) as u8 + unmoved;
        }
        Self {
            cells,
            side_to_move,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    last_move: Option<Move>,
    halfmove_clock: u16,
    fullmove_number: u16,
    position_history: Vec<PositionKey>,
    move_log: Vec<MoveOutcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new_game() -> Self {
        Self::from_board(initial_board(), Color::White)
    }

    /// Start from an arbitrary position with no prior history.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            last_move: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            position_history: vec![PositionKey::new(&board, side_to_move)],
            move_log: Vec::new(),
        }
    }

    /// Set the clocks of a position set up mid-game.
    pub fn with_clocks(mut self, halfmove_clock: u16, fullmove_number: u16) -> Self {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number.max(1);
        self
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn move_log(&self) -> &[MoveOutcome] {
        &self.move_log
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board, self.side_to_move, self.last_move)
    }

    /// How many times the current position has occurred, itself included.
    pub fn repetition_count(&self) -> usize {
        let current = PositionKey::new(&self.board, self.side_to_move);
        self.position_history
            .iter()
            .filter(|key| **key == current)
            .count()
    }

    pub fn status(&self) -> GameStatus {
        let board_status = status(&self.board, self.side_to_move, self.last_move);
        if board_status.is_over() {
            return board_status;
        }
        if self.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.repetition_count() >= REPETITION_LIMIT {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        GameStatus::InProgress
    }

    pub fn play_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, ChessErrors> {
        self.play_move_with_promotion(from, to, DEFAULT_PROMOTION)
    }

    #[inline]
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome, ChessErrors> {
        self.play_move(mv.from, mv.to)
    }

    /// Play a move for the side to move. On any error the game is unchanged.
    pub fn play_move_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> Result<MoveOutcome, ChessErrors> {
        if self.status().is_over() {
            return Err(ChessErrors::GameAlreadyOver);
        }
        let piece = self
            .board
            .piece_at(from)
            .copied()
            .ok_or(ChessErrors::NoPieceAtOrigin(from))?;
        if piece.color != self.side_to_move {
            debug!(%from, %to, "rejected move: wrong side to move");
            return Err(ChessErrors::WrongSideToMove {
                expected: self.side_to_move,
                found: piece.color,
            });
        }

        let outcome = apply_move_with_promotion(&mut self.board, from, to, self.last_move, promotion)?;

        if outcome.resets_halfmove_clock() {
            self.halfmove_clock = 0;
            self.position_history.clear();
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.opposite();
        self.last_move = Some(outcome.mv);
        self.position_history
            .push(PositionKey::new(&self.board, self.side_to_move));
        self.move_log.push(outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    fn play(game: &mut GameState, from: &str, to: &str) -> MoveOutcome {
        game.play_move(sq(from), sq(to)).expect("move should be legal")
    }

    #[test]
    fn turn_order_is_enforced() {
        let mut game = GameState::new_game();
        let err = game
            .play_move(sq("e7"), sq("e5"))
            .expect_err("black cannot open");
        assert_eq!(
            err,
            ChessErrors::WrongSideToMove {
                expected: Color::White,
                found: Color::Black
            }
        );
        play(&mut game, "e2", "e4");
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.last_move(), Some(Move::new(sq("e2"), sq("e4"))));
        play(&mut game, "e7", "e5");
        assert_eq!(game.fullmove_number(), 2);
        assert_eq!(game.move_log().len(), 2);
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = GameState::new_game();
        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        let mate = play(&mut game, "d8", "h4");
        assert!(mate.gives_check);
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert!(game.legal_moves().is_empty());
        assert_eq!(
            game.play_move(sq("a2"), sq("a3")),
            Err(ChessErrors::GameAlreadyOver)
        );
    }

    #[test]
    fn knight_shuffle_repeats_three_times() {
        let mut game = GameState::new_game();
        for _ in 0..2 {
            play(&mut game, "g1", "f3");
            play(&mut game, "g8", "f6");
            play(&mut game, "f3", "g1");
            play(&mut game, "f6", "g8");
        }
        assert_eq!(game.repetition_count(), 3);
        assert_eq!(
            game.status(),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
    }

    #[test]
    fn halfmove_clock_resets_on_pawn_moves() {
        let mut game = GameState::new_game();
        play(&mut game, "g1", "f3");
        play(&mut game, "g8", "f6");
        assert_eq!(game.halfmove_clock(), 2);
        play(&mut game, "e2", "e4");
        assert_eq!(game.halfmove_clock(), 0);
    }

    #[test]
    fn fifty_quiet_moves_draw() {
        let board = Board::from_diagram(
            "k.......
             ........
             ........
             ........
             ........
             ........
             ........
             .R.....K",
        )
        .expect("diagram");
        let mut game = GameState::from_board(board, Color::White).with_clocks(99, 60);
        assert_eq!(game.status(), GameStatus::InProgress);
        play(&mut game, "h1", "g1");
        assert_eq!(game.halfmove_clock(), 100);
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    }
}
