//! Iterative deepening driver over the minimax search.
//!
//! Depths are searched 1, 2, ... up to the configured maximum. The result of
//! the deepest fully completed depth is kept; a depth interrupted by the
//! wall-clock budget is thrown away. Depth 1 always runs to completion so a
//! position with a legal move always yields one.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::search::board_scoring::{BoardScorer, HeuristicScorer};
use crate::search::minimax::{search, seeded_rng, SearchContext, INFINITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub time_limit: Option<Duration>,
    /// Seed for the equal-score tie-break; `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            time_limit: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
}

pub fn iterative_deepening_search<S: BoardScorer>(
    board: &Board,
    color: Color,
    last_move: Option<Move>,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    if config.max_depth == 0 {
        return SearchResult {
            best_move: None,
            best_score: scorer.score(board, color),
            reached_depth: 0,
            nodes: 1,
        };
    }

    let start = Instant::now();
    let deadline = config.time_limit.map(|limit| start + limit);
    let mut ctx = SearchContext::new(scorer, color, seeded_rng(config.seed));
    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        if depth > 1 && deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        ctx.deadline = if depth == 1 { None } else { deadline };
        ctx.reset_abort();

        let (score, best_move) = search(&mut ctx, board, depth, -INFINITY, INFINITY, true, color, last_move);
        if ctx.aborted() {
            debug!(depth, "depth abandoned at deadline");
            break;
        }

        result.best_move = best_move;
        result.best_score = score;
        result.reached_depth = depth;
        result.nodes = ctx.nodes;
        debug!(
            depth,
            score,
            best = ?best_move.map(|mv| mv.to_string()),
            nodes = ctx.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completed depth"
        );

        if best_move.is_none() {
            break;
        }
    }

    result
}

/// Default-heuristic iterative deepening with an optional wall-clock budget.
pub fn iterative_deepening(
    board: &Board,
    color: Color,
    last_move: Option<Move>,
    max_depth: u8,
    time_limit: Option<Duration>,
) -> SearchResult {
    let config = SearchConfig {
        max_depth,
        time_limit,
        seed: None,
    };
    iterative_deepening_search(board, color, last_move, &HeuristicScorer::default(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::initial_board;
    use crate::game_state::chess_types::Square;
    use crate::move_generation::legal_move_generator::legal_moves;
    use crate::search::board_scoring::{MaterialScorer, MATE_SCORE};

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn reaches_requested_depth_without_budget() {
        let config = SearchConfig {
            max_depth: 2,
            time_limit: None,
            seed: Some(5),
        };
        let result = iterative_deepening_search(&initial_board(), Color::White, None, &MaterialScorer, config);
        assert_eq!(result.reached_depth, 2);
        let best = result.best_move.expect("startpos has moves");
        assert!(legal_moves(&initial_board(), Color::White, None).contains(&best));
    }

    #[test]
    fn zero_budget_still_completes_depth_one() {
        let config = SearchConfig {
            max_depth: 6,
            time_limit: Some(Duration::ZERO),
            seed: Some(1),
        };
        let result = iterative_deepening_search(&initial_board(), Color::White, None, &MaterialScorer, config);
        assert_eq!(result.reached_depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn seeded_runs_agree() {
        let config = SearchConfig {
            max_depth: 2,
            time_limit: None,
            seed: Some(99),
        };
        let a = iterative_deepening_search(&initial_board(), Color::White, None, &MaterialScorer, config);
        let b = iterative_deepening_search(&initial_board(), Color::White, None, &MaterialScorer, config);
        assert_eq!(a, b);
    }

    #[test]
    fn mate_in_one_survives_deeper_iterations() {
        let board = Board::from_diagram(
            "......k.
             .....ppp
             ........
             ........
             ........
             ........
             ........
             R...K...",
        )
        .expect("diagram");
        let config = SearchConfig {
            max_depth: 3,
            time_limit: None,
            seed: Some(2),
        };
        let result = iterative_deepening_search(&board, Color::White, None, &MaterialScorer, config);
        assert_eq!(result.best_move, Some(Move::new(sq("a1"), sq("a8"))));
        assert_eq!(result.best_score, MATE_SCORE - 1);
    }
}
