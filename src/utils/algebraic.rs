//! Square conversions between algebraic coordinates and board indices.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the
//! zero-based (file, rank) pairs and [`Square`] values used internally.
//! Every conversion is total on its valid domain and rejects anything else.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to zero-based `(file, rank)`.
pub fn algebraic_to_indices(square: &str) -> Result<(u8, u8), ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessErrors::InvalidAlgebraicChar(char::from(file)));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicChar(char::from(rank)));
    }

    Ok((file - b'a', rank - b'1'))
}

/// Convert zero-based `(file, rank)` to algebraic notation (for example: "e4").
pub fn indices_to_algebraic(file: u8, rank: u8) -> Result<String, ChessErrors> {
    Ok(Square::new(file, rank)?.to_string())
}

#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let (file, rank) = algebraic_to_indices(square)?;
    Square::new(file, rank)
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
