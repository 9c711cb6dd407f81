//! Engine abstraction layer used by the game driver.
//!
//! Defines common search limits and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

/// Per-move budgets. Any field left `None` falls back to the engine's own
/// configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub simulations: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Centipawns from the mover's point of view, when the engine has one.
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), ChessErrors> {
        Err(ChessErrors::UnknownOption(name.to_owned()))
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        limits: &SearchLimits,
    ) -> Result<EngineOutput, ChessErrors>;
}

/// Parses an option value, mapping failure to `InvalidOptionValue`.
pub(crate) fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ChessErrors> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ChessErrors::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        })
}

/// `None` for "0", "none" or "off", otherwise a parsed millisecond count.
pub(crate) fn parse_optional_millis(name: &str, value: &str) -> Result<Option<u64>, ChessErrors> {
    let v = value.trim().to_ascii_lowercase();
    if matches!(v.as_str(), "none" | "off") {
        return Ok(None);
    }
    let ms = parse_option::<u64>(name, value)?;
    Ok((ms > 0).then_some(ms))
}

/// `None` for "none" or "random", otherwise a parsed seed.
pub(crate) fn parse_seed(name: &str, value: &str) -> Result<Option<u64>, ChessErrors> {
    let v = value.trim().to_ascii_lowercase();
    if matches!(v.as_str(), "none" | "random") {
        return Ok(None);
    }
    parse_option::<u64>(name, value).map(Some)
}
