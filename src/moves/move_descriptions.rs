//! Descriptive record of an applied move.
//!
//! Everything a notation or logging layer needs to render a move after the
//! fact: the moved piece, any capture, the special-move kind and whether the
//! opponent was left in check.

use std::fmt;

use crate::game_state::chess_types::{Color, Move, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    Normal,
    DoublePawnPush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub color: Color,
    pub moved: PieceKind,
    pub captured: Option<PieceKind>,
    pub special: SpecialMove,
    pub promotion: Option<PieceKind>,
    pub gives_check: bool,
}

impl MoveOutcome {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Captures and pawn moves reset the fifty-move counter.
    #[inline]
    pub fn resets_halfmove_clock(&self) -> bool {
        self.is_capture() || self.moved == PieceKind::Pawn
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(
            self.special,
            SpecialMove::CastleKingside | SpecialMove::CastleQueenside
        )
    }
}

/// Long algebraic with capture and check marks, castles as `O-O` / `O-O-O`.
impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.special {
            SpecialMove::CastleKingside => write!(f, "O-O")?,
            SpecialMove::CastleQueenside => write!(f, "O-O-O")?,
            _ => {
                if self.moved != PieceKind::Pawn {
                    write!(f, "{}", self.moved.symbol())?;
                }
                let sep = if self.is_capture() { 'x' } else { '-' };
                write!(f, "{}{}{}", self.mv.from, sep, self.mv.to)?;
                if let Some(kind) = self.promotion {
                    write!(f, "={}", kind.symbol())?;
                }
                if self.special == SpecialMove::EnPassant {
                    write!(f, " e.p.")?;
                }
            }
        }
        if self.gives_check {
            write!(f, "+")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Square;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    fn outcome(moved: PieceKind, captured: Option<PieceKind>, special: SpecialMove) -> MoveOutcome {
        MoveOutcome {
            mv: Move::new(sq("e5"), sq("d6")),
            color: Color::White,
            moved,
            captured,
            special,
            promotion: None,
            gives_check: false,
        }
    }

    #[test]
    fn renders_captures_and_castles() {
        let ep = outcome(PieceKind::Pawn, Some(PieceKind::Pawn), SpecialMove::EnPassant);
        assert_eq!(ep.to_string(), "e5xd6 e.p.");
        let mut castle = outcome(PieceKind::King, None, SpecialMove::CastleQueenside);
        castle.gives_check = true;
        assert_eq!(castle.to_string(), "O-O-O+");
        assert!(castle.is_castle());
    }

    #[test]
    fn halfmove_reset_rules() {
        assert!(outcome(PieceKind::Pawn, None, SpecialMove::Normal).resets_halfmove_clock());
        assert!(outcome(PieceKind::Rook, Some(PieceKind::Knight), SpecialMove::Normal)
            .resets_halfmove_clock());
        assert!(!outcome(PieceKind::Rook, None, SpecialMove::Normal).resets_halfmove_clock());
    }
}
