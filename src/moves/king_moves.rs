//! King movement rule, castling included.
//!
//! Castling is the only move whose legality depends on attacks: the king may
//! not castle out of, through, or into check. Attack detection itself uses
//! [`king_attacks_square`], which never considers castling, so the two never
//! recurse into each other.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{CastlingWing, KINGSIDE, KING_START_FILE, QUEENSIDE};
use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::move_generation::legal_move_checks::square_is_attacked;

pub const KING_REACH: [u64; 64] = generate_king_reach();

const fn generate_king_reach() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut reach = 0u64;
        let mut df = -1i32;
        while df <= 1 {
            let mut dr = -1i32;
            while dr <= 1 {
                let f = file + df;
                let r = rank + dr;
                if (df != 0 || dr != 0) && f >= 0 && f <= 7 && r >= 0 && r <= 7 {
                    reach |= 1u64 << ((r * 8 + f) as u32);
                }
                dr += 1;
            }
            df += 1;
        }
        table[sq] = reach;
        sq += 1;
    }

    table
}

#[inline]
pub fn king_attacks_square(from: Square, target: Square) -> bool {
    KING_REACH[from.index()] & (1u64 << target.index()) != 0
}

/// Which wing a two-file king step from the start square castles toward.
pub fn castling_wing(from: Square, to: Square) -> Option<CastlingWing> {
    if from.rank() != to.rank() || from.file() != KING_START_FILE {
        return None;
    }
    match to.file() as i8 - from.file() as i8 {
        2 => Some(KINGSIDE),
        -2 => Some(QUEENSIDE),
        _ => None,
    }
}

fn is_castling_legal(board: &Board, king: &Piece, to: Square) -> bool {
    let Some(wing) = castling_wing(king.square, to) else {
        return false;
    };
    let home = king.color.home_rank();
    if king.has_moved || king.square.rank() != home {
        return false;
    }

    let Ok(rook_square) = Square::new(wing.rook_file, home) else {
        return false;
    };
    let rook_ready = matches!(
        board.piece_at(rook_square),
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
    );
    if !rook_ready {
        return false;
    }

    let between_empty = wing
        .between
        .iter()
        .filter_map(|&file| Square::new(file, home).ok())
        .all(|square| board.is_empty(square));
    if !between_empty {
        return false;
    }

    let step: i8 = if to.file() > king.square.file() { 1 } else { -1 };
    let transit = [Some(king.square), king.square.offset(step, 0), Some(to)];
    transit
        .iter()
        .all(|square| matches!(square, Some(s) if !square_is_attacked(board, *s, king.color)))
}

pub fn is_king_move_legal(board: &Board, king: &Piece, to: Square) -> bool {
    king_attacks_square(king.square, to) || is_castling_legal(board, king, to)
}
