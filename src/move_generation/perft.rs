//! Perft: exhaustive legal-move tree counting, the standard correctness check
//! for move generation. Per-kind counters are collected at the leaf ply.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::move_generation::legal_move_apply::apply_move_unchecked;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves};
use crate::moves::move_descriptions::SpecialMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(board: &Board, color: Color, last_move: Option<Move>, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in legal_moves(board, color, last_move) {
        total.merge(perft_child(board, color, mv, depth));
    }
    total
}

fn perft_child(board: &Board, color: Color, mv: Move, depth: u8) -> PerftCounts {
    let mut child = *board;
    let Ok(outcome) = apply_move_unchecked(&mut child, mv) else {
        return PerftCounts::default();
    };

    if depth > 1 {
        return perft(&child, color.opposite(), Some(mv), depth - 1);
    }

    let mut leaf = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    if outcome.is_capture() {
        leaf.captures = 1;
    }
    if outcome.special == SpecialMove::EnPassant {
        leaf.en_passant = 1;
    }
    if outcome.is_castle() {
        leaf.castles = 1;
    }
    if outcome.promotion.is_some() {
        leaf.promotions = 1;
    }
    if outcome.gives_check {
        leaf.checks = 1;
        if !has_any_legal_move(&child, color.opposite(), Some(mv)) {
            leaf.checkmates = 1;
        }
    }
    leaf
}

/// Node count below each root move, in generation order.
pub fn perft_divide(board: &Board, color: Color, last_move: Option<Move>, depth: u8) -> Vec<(Move, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    legal_moves(board, color, last_move)
        .into_iter()
        .map(|mv| (mv, perft_child(board, color, mv, depth).nodes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::initial_board;

    #[test]
    fn startpos_shallow_counts() {
        let board = initial_board();
        assert_eq!(perft(&board, Color::White, None, 1).nodes, 20);
        let two = perft(&board, Color::White, None, 2);
        assert_eq!(two.nodes, 400);
        assert_eq!(two.captures, 0);
    }

    #[test]
    fn startpos_depth_three() {
        let counts = perft(&initial_board(), Color::White, None, 3);
        assert_eq!(counts.nodes, 8902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = initial_board();
        let divided = perft_divide(&board, Color::White, None, 2);
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<usize>(), 400);
    }

    #[test]
    fn rook_endgame_position_three() {
        let board = Board::from_diagram(
            "........
             ..p.....
             ...p....
             KP.....r
             .R...p.k
             ........
             ....P.P.
             ........",
        )
        .expect("diagram");
        assert_eq!(perft(&board, Color::White, None, 1).nodes, 14);
        assert_eq!(perft(&board, Color::White, None, 2).nodes, 191);
        assert_eq!(perft(&board, Color::White, None, 3).nodes, 2812);
    }
}
