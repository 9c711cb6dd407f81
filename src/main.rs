//! Console driver: human vs engine or engine vs engine in the terminal.
//!
//! Run with:
//! `cargo run --release -- --white human --black minimax --depth 3`
//! `RUST_LOG=smart_chess=debug cargo run --release -- --white mcts --black minimax`

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use smart_chess::engines::engine_mcts::MctsEngine;
use smart_chess::engines::engine_minimax::MinimaxEngine;
use smart_chess::engines::engine_trait::{Engine, SearchLimits};
use smart_chess::game_state::chess_types::{Color, PieceKind};
use smart_chess::game_state::game_state::GameState;
use smart_chess::search::iterative_deepening::SearchConfig;
use smart_chess::search::mcts::MctsConfig;
use smart_chess::utils::long_algebraic::{long_algebraic_to_move, outcome_to_long_algebraic};
use smart_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Human,
    Minimax,
    Mcts,
}

#[derive(Debug, Parser)]
#[command(name = "smart_chess", about = "Play chess against minimax or MCTS engines")]
struct Cli {
    /// Who plays White.
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    white: PlayerKind,

    /// Who plays Black.
    #[arg(long, value_enum, default_value_t = PlayerKind::Minimax)]
    black: PlayerKind,

    /// Maximum minimax depth in plies.
    #[arg(long, default_value_t = 3)]
    depth: u8,

    /// Per-move wall-clock budget in milliseconds.
    #[arg(long)]
    movetime: Option<u64>,

    /// MCTS iteration budget per move.
    #[arg(long, default_value_t = 200)]
    simulations: u32,

    /// Seed for reproducible engine choices.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies, whatever the position.
    #[arg(long, default_value_t = 400)]
    max_plies: u32,
}

enum Player {
    Human,
    Engine(Box<dyn Engine>),
}

fn build_player(kind: PlayerKind, cli: &Cli) -> Player {
    match kind {
        PlayerKind::Human => Player::Human,
        PlayerKind::Minimax => Player::Engine(Box::new(MinimaxEngine::new(SearchConfig {
            max_depth: cli.depth.max(1),
            time_limit: None,
            seed: cli.seed,
        }))),
        PlayerKind::Mcts => Player::Engine(Box::new(MctsEngine::new(MctsConfig {
            simulations: cli.simulations,
            seed: cli.seed,
            ..MctsConfig::default()
        }))),
    }
}

/// Prompts until the human enters a legal move. `Ok(false)` means quit.
fn human_turn(game: &mut GameState, input: &mut impl BufRead) -> Result<bool, Box<dyn Error>> {
    loop {
        print!("{} move (e2e4, e7e8q, 'moves', 'quit'): ", game.side_to_move());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let text = line.trim();
        match text {
            "" => continue,
            "quit" | "exit" => return Ok(false),
            "moves" => {
                let listed: Vec<String> = game.legal_moves().iter().map(|mv| mv.to_string()).collect();
                println!("{}", listed.join(" "));
                continue;
            }
            _ => {}
        }

        let request = match long_algebraic_to_move(text) {
            Ok(request) => request,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let promotion = request.promotion.unwrap_or(PieceKind::Queen);
        match game.play_move_with_promotion(request.mv.from, request.mv.to, promotion) {
            Ok(outcome) => {
                println!("played {outcome}");
                return Ok(true);
            }
            Err(err) => println!("{err}"),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut white = build_player(cli.white, &cli);
    let mut black = build_player(cli.black, &cli);
    let limits = SearchLimits {
        depth: None,
        movetime_ms: cli.movetime,
        simulations: None,
    };

    let mut game = GameState::new_game();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut plies = 0u32;

    loop {
        println!("\n{}", render_game_state(&game));
        let status = game.status();
        if status.is_over() {
            println!("game over: {status} ({})", status.result_tag());
            break;
        }
        if plies >= cli.max_plies {
            println!("stopping after {plies} plies");
            break;
        }

        let player = match game.side_to_move() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match player {
            Player::Human => {
                if !human_turn(&mut game, &mut input)? {
                    println!("bye");
                    break;
                }
            }
            Player::Engine(engine) => {
                let output = engine.choose_move(&game, &limits)?;
                for line in &output.info_lines {
                    println!("{line}");
                }
                let Some(mv) = output.best_move else {
                    warn!(engine = engine.name(), "engine returned no move");
                    break;
                };
                let outcome = game.play(mv)?;
                println!("{} plays {}", engine.name(), outcome_to_long_algebraic(&outcome));
            }
        }
        plies += 1;
    }

    Ok(())
}
