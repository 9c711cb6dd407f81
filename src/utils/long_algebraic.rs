//! Long algebraic move text ("e2e4", "e7e8q") for console input and logs.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{Move, PieceKind};
use crate::moves::move_descriptions::MoveOutcome;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// A parsed move request: the move plus an optional promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput {
    pub mv: Move,
    pub promotion: Option<PieceKind>,
}

pub fn long_algebraic_to_move(long_algebraic: &str) -> Result<MoveInput, ChessErrors> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch)?),
        None => None,
    };

    Ok(MoveInput {
        mv: Move::new(from, to),
        promotion,
    })
}

pub fn move_to_long_algebraic(mv: Move, promotion: Option<PieceKind>) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from));
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(kind) = promotion {
        out.push(kind.symbol().to_ascii_lowercase());
    }
    out
}

/// Long algebraic text of a played move, promotion letter included.
pub fn outcome_to_long_algebraic(outcome: &MoveOutcome) -> String {
    move_to_long_algebraic(outcome.mv, outcome.promotion)
}

fn char_to_promotion(ch: char) -> Result<PieceKind, ChessErrors> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(ChessErrors::InvalidAlgebraicChar(ch)),
    }
}
