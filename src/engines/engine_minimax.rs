//! Minimax engine driven by iterative deepening.
//!
//! Searches with the heuristic scorer up to the configured depth, optionally
//! cut short by a move-time budget. Equal-valued moves are broken by the
//! weighted random draw, reproducible when a seed is set.

use std::time::Duration;

use tracing::info;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{
    parse_option, parse_optional_millis, parse_seed, Engine, EngineOutput, SearchLimits,
};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::HeuristicScorer;
use crate::search::iterative_deepening::{iterative_deepening_search, SearchConfig};

#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    config: SearchConfig,
    scorer: HeuristicScorer,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            scorer: HeuristicScorer::default(),
        }
    }

    pub fn with_scorer(config: SearchConfig, scorer: HeuristicScorer) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessErrors> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth = parse_option::<u8>(name, value)?;
            self.config.max_depth = depth.max(1);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveTime") {
            self.config.time_limit = parse_optional_millis(name, value)?.map(Duration::from_millis);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            self.config.seed = parse_seed(name, value)?;
            return Ok(());
        }
        Err(ChessErrors::UnknownOption(name.to_owned()))
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        limits: &SearchLimits,
    ) -> Result<EngineOutput, ChessErrors> {
        if game_state.status().is_over() {
            return Err(ChessErrors::GameAlreadyOver);
        }

        let mut config = self.config;
        if let Some(depth) = limits.depth {
            config.max_depth = depth.max(1);
        }
        if let Some(ms) = limits.movetime_ms {
            config.time_limit = Some(Duration::from_millis(ms));
        }

        let result = iterative_deepening_search(
            game_state.board(),
            game_state.side_to_move(),
            game_state.last_move(),
            &self.scorer,
            config,
        );

        info!(
            engine = self.name(),
            side = %game_state.side_to_move(),
            best = ?result.best_move.map(|mv| mv.to_string()),
            score = result.best_score,
            depth = result.reached_depth,
            nodes = result.nodes,
            "engine decision"
        );

        Ok(EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: vec![format!(
                "info depth {} score cp {} nodes {}",
                result.reached_depth, result.best_score, result.nodes
            )],
        })
    }
}
