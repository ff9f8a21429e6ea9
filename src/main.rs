//! Headless Labyrinth game: seats 0..humans go through the two-phase human
//! turn API (driven by a local random strategy), the rest are robots.
//!
//! Usage:
//!   cargo run --release -- --humans 2 --seed 7 --standard
//!   cargo run --release -- --humans 1 --json > game.json

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use labyrinth_engine::engine::profiles::{load_default_profiles, load_profiles};
use labyrinth_engine::games::labyrinth::{LabyrinthFacade, Move, RandomStrategy, Strategy};
use labyrinth_engine::GameError;

#[derive(Parser)]
#[command(name = "labyrinth", about = "Play one headless game of Labyrinth")]
struct Cli {
    /// Seats played through the human turn API (1-4)
    #[arg(long, default_value = "1")]
    humans: usize,

    /// Robot difficulty: 0 easy, 1 medium, 2 hard
    #[arg(long, default_value = "0")]
    difficulty: u32,

    /// Require a return to the start corner after the last objective
    #[arg(long)]
    standard: bool,

    /// Random seed (default: entropy)
    #[arg(long, env = "LABYRINTH_SEED")]
    seed: Option<u64>,

    /// Stop after this many turns
    #[arg(long, default_value = "2000")]
    max_turns: usize,

    /// Path to strategy_profiles.toml (default: auto-discover)
    #[arg(long, env = "LABYRINTH_PROFILES")]
    profiles: Option<PathBuf>,

    /// Print the final game snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Insert, then move, as a player at the table would.
fn play_human_turn(
    facade: &mut LabyrinthFacade,
    strategy: &mut dyn Strategy,
) -> Result<Move, GameError> {
    let game = facade.game().ok_or(GameError::NoGame)?;
    let mv = strategy.choose_move(game.board(), game.current_player(), game.spare_tile());
    while facade.spare_tile().map(|t| t.orientation()) != Some(mv.rotation) {
        if !facade.rotate_spare_tile() {
            break;
        }
    }
    facade.insert_tile(mv.arrow)?;
    facade.move_player(mv.destination)?;
    Ok(mv)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };
    let mut facade = match cli.seed {
        Some(seed) => LabyrinthFacade::seeded(seed),
        None => LabyrinthFacade::new(),
    }
    .with_profiles(profiles);
    let mut local = match cli.seed {
        Some(seed) => RandomStrategy::new(seed.wrapping_add(1)),
        None => RandomStrategy::from_entropy(),
    };

    facade.start_new_game(cli.humans, cli.difficulty, !cli.standard)?;

    let mut turns = 0;
    let mut exercised_undo = false;
    while facade.is_game_running() && turns < cli.max_turns {
        let seat = facade.current_player().map(|p| p.id()).unwrap_or_default();
        let mv = if facade.is_current_player_robot() {
            facade.play_ai_turn()?
        } else {
            play_human_turn(&mut facade, &mut local)?
        };
        turns += 1;
        tracing::info!(
            turn = turns,
            player = seat,
            arrow = %mv.arrow,
            destination = %mv.destination,
            remaining = ?facade.players().get(seat).map(|p| p.remaining_objectives()),
            "turn played"
        );

        // Take the first turn back and replay it.
        if !exercised_undo && facade.is_game_running() {
            exercised_undo = true;
            let before = facade.snapshot();
            if facade.undo() && facade.redo() {
                tracing::info!(consistent = before == facade.snapshot(), "undo/redo replayed");
            }
        }
    }

    match facade.winner() {
        Some(winner) => tracing::info!(
            winner = winner.id(),
            name = winner.name(),
            color = ?winner.color(),
            turns,
            "game won"
        ),
        None => {
            tracing::info!(turns, "turn limit reached, abandoning");
            facade.abandon();
        }
    }

    if cli.json {
        if let Some(snapshot) = facade.snapshot() {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}
