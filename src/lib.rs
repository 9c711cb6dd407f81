//! Crate root module declarations for the smart_chess engine.
//!
//! This file exposes all top-level subsystems (board model, piece movement
//! rules, legality checking, game state, search, engines and utility helpers)
//! so the console driver, tests, benches and external tooling can import
//! stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod piece_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod sliding;
}

pub mod move_generation {
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod mcts;
    pub mod minimax;
}

pub mod tables {
    pub mod piece_square;
}

pub mod engines {
    pub mod engine_mcts;
    pub mod engine_minimax;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod long_algebraic;
    pub mod render_game_state;
}

pub use chess_errors::ChessErrors;
pub use game_state::board::{initial_board, Board};
pub use game_state::chess_types::{Color, Move, Piece, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use move_generation::game_status::{status, DrawReason, GameStatus};
pub use move_generation::legal_move_apply::{apply_move, apply_move_with_promotion};
pub use move_generation::legal_move_checks::{king_in_check, square_is_attacked};
pub use move_generation::legal_move_generator::legal_moves;
pub use moves::move_descriptions::{MoveOutcome, SpecialMove};
pub use search::iterative_deepening::{iterative_deepening, SearchResult};
pub use search::mcts::best_move_mcts;
pub use search::minimax::best_move_minimax;
