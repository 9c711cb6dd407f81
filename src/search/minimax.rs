//! Depth-bounded minimax with alpha-beta pruning.
//!
//! Values are always taken from one fixed perspective color: the maximizing
//! side is whichever side that color is. Mates are scored as
//! `MATE_SCORE - ply`, so a faster mate is preferred and a slower loss is less
//! bad.
//!
//! Equal-valued root moves are resolved by a weighted random draw (see
//! [`move_weight`]). To make root ties exact, each root child is searched with
//! its window widened by one point on the side being improved; deeper nodes
//! use the plain window since only their value matters.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::move_generation::legal_move_apply::{make_move, DEFAULT_PROMOTION};
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::search::board_scoring::{move_weight, BoardScorer, HeuristicScorer, MATE_SCORE};

/// Outer bound of the search window. Leaves room for one-point widening.
pub const INFINITY: i32 = MATE_SCORE + 1000;

/// How often (in nodes) the deadline is polled.
const DEADLINE_POLL_MASK: u64 = 0xFF;

/// Per-search mutable state: scorer, perspective, RNG, budget and counters.
pub struct SearchContext<'a> {
    pub scorer: &'a dyn BoardScorer,
    pub perspective: Color,
    pub rng: StdRng,
    pub deadline: Option<Instant>,
    pub nodes: u64,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(scorer: &'a dyn BoardScorer, perspective: Color, rng: StdRng) -> Self {
        Self {
            scorer,
            perspective,
            rng,
            deadline: None,
            nodes: 0,
            aborted: false,
        }
    }

    /// True once the deadline passed mid-search; the last result is unusable.
    #[inline]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub(crate) fn reset_abort(&mut self) {
        self.aborted = false;
    }

    fn out_of_time(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.nodes & DEADLINE_POLL_MASK == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.aborted = true;
                }
            }
        }
        self.aborted
    }
}

/// RNG seeded from `seed`, or from the thread RNG when no seed is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Score of a position where `color` is to move and has no legal move.
#[inline]
fn terminal_score(board: &Board, color: Color, perspective: Color, ply: u32) -> i32 {
    if !king_in_check(board, color) {
        return 0;
    }
    let mate = MATE_SCORE - ply as i32;
    if color == perspective {
        -mate
    } else {
        mate
    }
}

/// Root search. Returns the minimax value from `ctx.perspective` and the chosen
/// move, `None` when `color` has no legal move or `depth` is zero.
#[allow(clippy::too_many_arguments)]
pub fn search(
    ctx: &mut SearchContext<'_>,
    board: &Board,
    depth: u8,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    color: Color,
    last_move: Option<Move>,
) -> (i32, Option<Move>) {
    search_node(ctx, board, depth, alpha, beta, maximizing, color, last_move, 0)
}

#[allow(clippy::too_many_arguments)]
fn search_node(
    ctx: &mut SearchContext<'_>,
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    color: Color,
    last_move: Option<Move>,
    ply: u32,
) -> (i32, Option<Move>) {
    ctx.nodes += 1;
    if ply > 0 && ctx.out_of_time() {
        return (0, None);
    }
    if depth == 0 {
        return (ctx.scorer.score(board, ctx.perspective), None);
    }

    let moves = legal_moves(board, color, last_move);
    if moves.is_empty() {
        return (terminal_score(board, color, ctx.perspective, ply), None);
    }

    let at_root = ply == 0;
    let mut best_value = if maximizing { -INFINITY } else { INFINITY };
    let mut best_moves: Vec<Move> = Vec::new();

    for mv in moves {
        let mut child = *board;
        if make_move(&mut child, mv, DEFAULT_PROMOTION).is_none() {
            continue;
        }

        let (child_alpha, child_beta) = match (at_root, maximizing) {
            (true, true) => (alpha - 1, beta),
            (true, false) => (alpha, beta + 1),
            (false, _) => (alpha, beta),
        };
        let (value, _) = search_node(
            ctx,
            &child,
            depth - 1,
            child_alpha,
            child_beta,
            !maximizing,
            color.opposite(),
            Some(mv),
            ply + 1,
        );
        if ctx.aborted {
            return (best_value, best_moves.first().copied());
        }

        let improves = if maximizing {
            value > best_value
        } else {
            value < best_value
        };
        if improves {
            best_value = value;
            best_moves.clear();
            best_moves.push(mv);
        } else if value == best_value {
            best_moves.push(mv);
        }

        if maximizing {
            alpha = alpha.max(best_value);
        } else {
            beta = beta.min(best_value);
        }
        if beta <= alpha {
            break;
        }
    }

    let chosen = if at_root && best_moves.len() > 1 {
        best_moves
            .choose_weighted(&mut ctx.rng, |mv| move_weight(board, *mv))
            .ok()
            .copied()
            .or_else(|| best_moves.first().copied())
    } else {
        best_moves.first().copied()
    };
    (best_value, chosen)
}

/// Fixed-depth minimax with the default heuristic and an unseeded tie-break.
pub fn best_move_minimax(
    board: &Board,
    depth: u8,
    color: Color,
    last_move: Option<Move>,
) -> Option<Move> {
    best_move_minimax_seeded(board, depth, color, last_move, None)
}

pub fn best_move_minimax_seeded(
    board: &Board,
    depth: u8,
    color: Color,
    last_move: Option<Move>,
    seed: Option<u64>,
) -> Option<Move> {
    let scorer = HeuristicScorer::default();
    let mut ctx = SearchContext::new(&scorer, color, seeded_rng(seed));
    let (_, best) = search(&mut ctx, board, depth.max(1), -INFINITY, INFINITY, true, color, last_move);
    best
}
