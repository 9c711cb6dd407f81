//! Monte Carlo tree search engine.

use std::time::Duration;

use tracing::info;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{
    parse_option, parse_optional_millis, parse_seed, Engine, EngineOutput, SearchLimits,
};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::HeuristicScorer;
use crate::search::mcts::{MctsConfig, MctsTree};

#[derive(Debug, Clone, Default)]
pub struct MctsEngine {
    config: MctsConfig,
    scorer: HeuristicScorer,
}

impl MctsEngine {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            config,
            scorer: HeuristicScorer::default(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

impl Engine for MctsEngine {
    fn name(&self) -> &str {
        "mcts"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessErrors> {
        if name.eq_ignore_ascii_case("Simulations") {
            self.config.simulations = parse_option::<u32>(name, value)?;
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
        if name.eq_ignore_ascii_case("Rollouts") {
            self.config.rollouts_per_leaf = parse_option::<usize>(name, value)?.clamp(1, 64);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("RolloutDepth") {
            self.config.rollout_depth = parse_option::<u16>(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Exploration") {
            let c = parse_option::<f64>(name, value)?;
            if !c.is_finite() || c < 0.0 {
                return Err(ChessErrors::InvalidOptionValue {
                    name: name.to_owned(),
                    value: value.to_owned(),
                });
            }
            self.config.exploration = c;
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
        if let Some(simulations) = limits.simulations {
            config.simulations = simulations;
        }
        if let Some(ms) = limits.movetime_ms {
            config.time_limit = Some(Duration::from_millis(ms));
        }

        let mut tree = MctsTree::new(
            game_state.board(),
            game_state.side_to_move(),
            game_state.last_move(),
            &self.scorer,
            config,
        );
        let best_move = tree.search();
        let stats = tree.stats();
        let chosen = stats
            .children
            .iter()
            .find(|child| Some(child.mv) == best_move);

        info!(
            engine = self.name(),
            side = %game_state.side_to_move(),
            best = ?best_move.map(|mv| mv.to_string()),
            iterations = stats.iterations,
            tree_size = stats.tree_size,
            "engine decision"
        );

        let mut info_lines = vec![format!(
            "info iterations {} nodes {} visits {}",
            stats.iterations, stats.tree_size, stats.root_visits
        )];
        if let Some(child) = chosen {
            info_lines.push(format!(
                "info move {} visits {} value {:.3}",
                child.mv, child.visits, child.mean_value
            ));
        }

        Ok(EngineOutput {
            best_move,
            score: None,
            info_lines,
        })
    }
}
