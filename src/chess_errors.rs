//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type returned by board construction,
//! notation parsing, move application and engine configuration. Each variant
//! carries enough context to print a useful message back to whoever typed the
//! offending input.
//!
//! Usage guidelines:
//! - Parsing variants (`InvalidAlgebraicString`, `InvalidSquare`, ...) are
//!   raised at the boundary and never reach the board.
//! - Move variants (`IllegalMove`, `LeavesKingInCheck`, ...) mean the move was
//!   refused and the board was left untouched, so the caller can simply ask
//!   again.
//! - A missing king is *not* reported here: the check engine reads it as
//!   "in check" so that the game loop sees a game-over position instead.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Unified error type for the chess engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// File or rank index outside `0..=7`.
    #[error("invalid square: file {file}, rank {rank} (both must be 0-7)")]
    InvalidSquare { file: i16, rank: i16 },

    /// A square/move string that is not of the expected shape.
    #[error("invalid algebraic string: {0:?}")]
    InvalidAlgebraicString(String),

    /// A single character outside 'a'..'h' / '1'..'8' or the piece letters.
    #[error("invalid algebraic character: {0:?}")]
    InvalidAlgebraicChar(char),

    #[error("no piece at origin square {0}")]
    NoPieceAtOrigin(Square),

    #[error("destination {0} is occupied by a piece of the moving side")]
    DestinationOccupiedByOwnPiece(Square),

    /// The piece cannot reach the destination under its movement rules.
    #[error("illegal move for {kind:?} from {from} to {to}")]
    IllegalMove {
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("move {from}{to} would leave the {color:?} king in check")]
    LeavesKingInCheck {
        color: Color,
        from: Square,
        to: Square,
    },

    #[error("it is {expected:?}'s turn, not {found:?}'s")]
    WrongSideToMove { expected: Color, found: Color },

    #[error("pawns cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    #[error("a {0:?} king is already on the board")]
    DuplicateKing(Color),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),

    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("unknown engine option: {0}")]
    UnknownOption(String),

    #[error("invalid value {value:?} for engine option {name}")]
    InvalidOptionValue { name: String, value: String },
}
