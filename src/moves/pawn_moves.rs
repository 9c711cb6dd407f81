//! Pawn movement rule: pushes, the double step, diagonal captures and
//! en passant.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, Piece, PieceKind, Square};

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(1);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(-1);

const fn generate_pawn_attacks(forward: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32 + forward;
        let mut attacks = 0u64;

        if rank >= 0 && rank <= 7 {
            if file > 0 {
                attacks |= 1u64 << ((rank * 8 + file - 1) as u32);
            }
            if file < 7 {
                attacks |= 1u64 << ((rank * 8 + file + 1) as u32);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[inline]
pub const fn pawn_attack_mask(color: Color, from: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[from.index()],
        Color::Black => BLACK_PAWN_ATTACKS[from.index()],
    }
}

/// Pawns attack diagonally forward only; a push never attacks.
#[inline]
pub fn pawn_attacks_square(color: Color, from: Square, target: Square) -> bool {
    pawn_attack_mask(color, from) & (1u64 << target.index()) != 0
}

/// True when moving `pawn` to `to` is an en passant capture: the previous move
/// was an enemy pawn's double step that landed beside `pawn` on the file of
/// `to`.
pub fn is_en_passant_capture(
    board: &Board,
    pawn: &Piece,
    to: Square,
    last_move: Option<Move>,
) -> bool {
    let Some(last) = last_move else {
        return false;
    };
    if !pawn_attacks_square(pawn.color, pawn.square, to) || !board.is_empty(to) {
        return false;
    }
    let Some(victim) = board.piece_at(last.to) else {
        return false;
    };
    victim.kind == PieceKind::Pawn
        && victim.color != pawn.color
        && last.rank_delta().abs() == 2
        && last.file_delta() == 0
        && last.to.file() == to.file()
        && last.to.rank() == pawn.square.rank()
}

pub fn is_pawn_move_legal(
    board: &Board,
    pawn: &Piece,
    to: Square,
    last_move: Option<Move>,
) -> bool {
    let from = pawn.square;
    let forward = pawn.color.forward();
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;

    match (df, dr) {
        (0, step) if step == forward => board.is_empty(to),
        (0, step) if step == 2 * forward => {
            if pawn.has_moved || from.rank() != pawn.color.pawn_start_rank() {
                return false;
            }
            match from.offset(0, forward) {
                Some(middle) => board.is_empty(middle) && board.is_empty(to),
                None => false,
            }
        }
        (-1 | 1, step) if step == forward => {
            board.is_occupied_by(to, pawn.color.opposite())
                || is_en_passant_capture(board, pawn, to, last_move)
        }
        _ => false,
    }
}
