//! Pluggable board evaluation interfaces and the default heuristic.
//!
//! Search delegates static position scoring to [`BoardScorer`], so alternate
//! heuristics can be swapped without touching search code. Scores are
//! centipawns from the point of view of the requested color and every scorer
//! here is antisymmetric: `score(b, White) == -score(b, Black)`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, PieceKind, Square};
use crate::move_generation::legal_move_checks::attackers_to_square;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::tables::piece_square::piece_square_value;

/// Score of a side that is checkmated at the root, before ply adjustment.
pub const MATE_SCORE: i32 = 30000;

/// Charged to a side whose king has disappeared from the board.
const MISSING_KING_PENALTY: i32 = 10000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `color`; higher is better for `color`.
    fn score(&self, board: &Board, color: Color) -> i32;
}

/// Centipawn value of a piece kind. The king has no material value; losing it
/// is handled as mate by search.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

/// Capture value in whole pawns, used for move ordering weights.
#[inline]
pub const fn capture_value_in_pawns(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// Desirability of a move for tie-breaking: 1 for a quiet move, plus the
/// pawn value of any enemy piece standing on the destination.
pub fn move_weight(board: &Board, mv: Move) -> u32 {
    let Some(mover) = board.piece_at(mv.from) else {
        return 1;
    };
    match board.piece_at(mv.to) {
        Some(target) if target.color != mover.color => 1 + capture_value_in_pawns(target.kind),
        _ => 1,
    }
}

fn material(board: &Board, color: Color) -> i32 {
    board.pieces(color).map(|p| piece_value(p.kind)).sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, color: Color) -> i32 {
        material(board, color) - material(board, color.opposite())
    }
}

/// Term weights of [`HeuristicScorer`], centipawns per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub piece_square: bool,
    pub mobility: i32,
    pub doubled_pawn: i32,
    pub isolated_pawn: i32,
    pub passed_pawn: i32,
    pub missing_pawn_shield: i32,
    pub king_attacker: i32,
    pub center_occupancy: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            piece_square: true,
            mobility: 5,
            doubled_pawn: -20,
            isolated_pawn: -10,
            passed_pawn: 20,
            missing_pawn_shield: -10,
            king_attacker: -50,
            center_occupancy: 20,
        }
    }
}

/// Material, piece-square tables, mobility, pawn structure, king safety and
/// center occupancy, summed as own-minus-opponent differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    pub weights: ScoringWeights,
}

const CENTER: [Square; 4] = [
    Square::from_index_unchecked(27),
    Square::from_index_unchecked(28),
    Square::from_index_unchecked(35),
    Square::from_index_unchecked(36),
];

impl HeuristicScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    fn positional(&self, board: &Board, color: Color) -> i32 {
        if !self.weights.piece_square {
            return 0;
        }
        board
            .pieces(color)
            .map(|p| piece_square_value(p.kind, p.color, p.square))
            .sum()
    }

    fn mobility(&self, board: &Board, color: Color) -> i32 {
        if self.weights.mobility == 0 {
            return 0;
        }
        let own = legal_moves(board, color, None).len() as i32;
        let theirs = legal_moves(board, color.opposite(), None).len() as i32;
        (own - theirs) * self.weights.mobility
    }

    pub fn pawn_structure(&self, board: &Board, color: Color) -> i32 {
        let mut own_files = [0u8; 8];
        let mut enemy_pawns = Vec::with_capacity(8);
        for piece in board.all_pieces().filter(|p| p.kind == PieceKind::Pawn) {
            if piece.color == color {
                own_files[piece.square.file() as usize] += 1;
            } else {
                enemy_pawns.push(piece.square);
            }
        }

        let mut score = 0;
        for (file, &count) in own_files.iter().enumerate() {
            if count > 1 {
                score += (count as i32 - 1) * self.weights.doubled_pawn;
            }
            if count > 0 {
                let left = file.checked_sub(1).map_or(0, |f| own_files[f]);
                let right = own_files.get(file + 1).copied().unwrap_or(0);
                if left == 0 && right == 0 {
                    score += count as i32 * self.weights.isolated_pawn;
                }
            }
        }

        let forward = color.forward();
        for pawn in board.pieces(color).filter(|p| p.kind == PieceKind::Pawn) {
            let blocked = enemy_pawns.iter().any(|enemy| {
                let file_gap = (enemy.file() as i8 - pawn.square.file() as i8).abs();
                let ahead = (enemy.rank() as i8 - pawn.square.rank() as i8) * forward > 0;
                file_gap <= 1 && ahead
            });
            if !blocked {
                score += self.weights.passed_pawn;
            }
        }
        score
    }

    pub fn king_safety(&self, board: &Board, color: Color) -> i32 {
        let Some(king) = board.king_square(color) else {
            return -MISSING_KING_PENALTY;
        };
        let mut score = 0;
        for df in -1..=1 {
            if let Some(shield) = king.offset(df, color.forward()) {
                let sheltered = matches!(
                    board.piece_at(shield),
                    Some(p) if p.kind == PieceKind::Pawn && p.color == color
                );
                if !sheltered {
                    score += self.weights.missing_pawn_shield;
                }
            }
        }
        let attackers = attackers_to_square(board, king, color.opposite()).len() as i32;
        score + attackers * self.weights.king_attacker
    }

    fn center(&self, board: &Board, color: Color) -> i32 {
        CENTER
            .iter()
            .filter_map(|&square| board.piece_at(square))
            .map(|p| {
                if p.color == color {
                    self.weights.center_occupancy
                } else {
                    -self.weights.center_occupancy
                }
            })
            .sum()
    }
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, board: &Board, color: Color) -> i32 {
        let them = color.opposite();
        let material = material(board, color) - material(board, them);
        let positional = self.positional(board, color) - self.positional(board, them);
        let pawns = self.pawn_structure(board, color) - self.pawn_structure(board, them);
        let safety = self.king_safety(board, color) - self.king_safety(board, them);
        material + positional + pawns + safety + self.mobility(board, color) + self.center(board, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::initial_board;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn start_position_is_balanced() {
        let board = initial_board();
        assert_eq!(MaterialScorer.score(&board, Color::White), 0);
        assert_eq!(HeuristicScorer::default().score(&board, Color::White), 0);
    }

    #[test]
    fn scores_are_antisymmetric() {
        let board = Board::from_diagram(
            "r...k..r
             ppp..ppp
             ..n.....
             ...pP...
             ........
             .....N..
             PPP..PPP
             R..QK..R",
        )
        .expect("diagram");
        let scorer = HeuristicScorer::default();
        assert_eq!(
            scorer.score(&board, Color::White),
            -scorer.score(&board, Color::Black)
        );
        assert_eq!(
            MaterialScorer.score(&board, Color::White),
            -MaterialScorer.score(&board, Color::Black)
        );
    }

    #[test]
    fn material_counts_missing_queen() {
        let mut board = initial_board();
        board.remove(sq("d8"));
        assert_eq!(MaterialScorer.score(&board, Color::White), 900);
        assert!(HeuristicScorer::default().score(&board, Color::Black) < -800);
    }

    #[test]
    fn pawn_structure_terms() {
        let board = Board::from_diagram(
            "....k...
             ........
             ........
             ........
             ........
             P.......
             P......P
             ....K...",
        )
        .expect("diagram");
        let scorer = HeuristicScorer::default();
        // a-file: doubled (-20), two isolated (-20), two passed (+40); h-file: isolated, passed.
        assert_eq!(scorer.pawn_structure(&board, Color::White), -20 - 20 + 40 - 10 + 20);
    }

    #[test]
    fn king_safety_counts_shield_and_attackers() {
        let board = Board::from_diagram(
            "....k...
             ....r...
             ........
             ........
             ........
             ........
             .....P..
             ....K...",
        )
        .expect("diagram");
        let scorer = HeuristicScorer::default();
        // d2 and e2 unshielded, one rook attacking.
        assert_eq!(scorer.king_safety(&board, Color::White), -10 - 10 - 50);
    }

    #[test]
    fn move_weight_prefers_big_captures() {
        let board = Board::from_diagram(
            "....k...
             ........
             ........
             ...q.r..
             ....P...
             ........
             ........
             ....K...",
        )
        .expect("diagram");
        assert_eq!(move_weight(&board, Move::new(sq("e4"), sq("d5"))), 10);
        assert_eq!(move_weight(&board, Move::new(sq("e4"), sq("f5"))), 6);
        assert_eq!(move_weight(&board, Move::new(sq("e4"), sq("e5"))), 1);
    }
}
