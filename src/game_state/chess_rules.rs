//! Canonical chess-rule constants.
//!
//! Static rule literals shared by board setup, castling and the draw rules.

use crate::game_state::chess_types::PieceKind;

/// Back-rank arrangement from the a-file to the h-file.
pub const BACK_RANK_ORDER: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// File the king starts on.
pub const KING_START_FILE: u8 = 4;

/// Castling geometry per wing, all as file indices on the home rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingWing {
    pub rook_file: u8,
    pub king_to_file: u8,
    pub rook_to_file: u8,
    /// Files that must be empty between king and rook.
    pub between: &'static [u8],
}

pub const KINGSIDE: CastlingWing = CastlingWing {
    rook_file: 7,
    king_to_file: 6,
    rook_to_file: 5,
    between: &[5, 6],
};

pub const QUEENSIDE: CastlingWing = CastlingWing {
    rook_file: 0,
    king_to_file: 2,
    rook_to_file: 3,
    between: &[1, 2, 3],
};

/// Half-moves without a capture or pawn move before the fifty-move draw.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position that make a threefold repetition.
pub const REPETITION_LIMIT: usize = 3;
