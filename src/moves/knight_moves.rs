//! Knight movement rule.
//!
//! Knight reach is fixed per square, so it is precomputed once as a 64-entry
//! table of target masks.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_REACH: [u64; 64] = generate_knight_reach();

const fn generate_knight_reach() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut reach = 0u64;
        let mut i = 0usize;
        while i < KNIGHT_OFFSETS.len() {
            let f = file + KNIGHT_OFFSETS[i].0;
            let r = rank + KNIGHT_OFFSETS[i].1;
            if f >= 0 && f <= 7 && r >= 0 && r <= 7 {
                reach |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }
        table[sq] = reach;
        sq += 1;
    }

    table
}

#[inline]
pub fn knight_attacks_square(from: Square, target: Square) -> bool {
    KNIGHT_REACH[from.index()] & (1u64 << target.index()) != 0
}

/// Destination ownership is checked by the caller; a knight jumps, so only the
/// offset matters.
#[inline]
pub fn is_knight_move_legal(_board: &Board, knight: &Piece, to: Square) -> bool {
    knight_attacks_square(knight.square, to)
}
