//! Arena CLI: run robot-vs-robot Labyrinth games from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 500 --seed 1
//!   cargo run --release --bin arena -- --games 100 --standard --max-turns 5000

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use labyrinth_engine::engine::arena::{run_arena, ArenaConfig};
use labyrinth_engine::engine::profiles::{load_default_profiles, load_profiles};

#[derive(Parser)]
#[command(name = "arena", about = "Run robot-vs-robot Labyrinth games")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Base random seed; game i uses seed + i
    #[arg(long, default_value = "42", env = "LABYRINTH_SEED")]
    seed: u64,

    /// Require a return to the start corner after the last objective
    #[arg(long)]
    standard: bool,

    /// Games still running after this many turns count as unfinished
    #[arg(long, default_value = "2000")]
    max_turns: usize,

    /// Robot difficulty: 0 easy, 1 medium, 2 hard
    #[arg(long, default_value = "0")]
    difficulty: u32,

    /// Path to strategy_profiles.toml
    #[arg(long, env = "LABYRINTH_PROFILES")]
    profiles: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path).unwrap_or_else(|e| {
            eprintln!("Error loading profiles: {}", e);
            std::process::exit(1);
        }),
        None => load_default_profiles(),
    };

    let config = ArenaConfig {
        num_games: cli.games,
        base_seed: cli.seed,
        simplified: !cli.standard,
        max_turns: cli.max_turns,
        difficulty: cli.difficulty,
    };
    eprintln!(
        "Arena: {} games, seed={}, standard={}, max_turns={}, difficulty={} ({})",
        config.num_games,
        config.base_seed,
        cli.standard,
        config.max_turns,
        config.difficulty,
        profiles.profile_for(config.difficulty).strategy_type,
    );

    let progress_cb = |done: usize, total: usize| {
        eprint!("\r  [{}/{}] games completed", done, total);
    };

    let result = run_arena(&config, &profiles, Some(&progress_cb)).unwrap_or_else(|e| {
        eprintln!("\nArena aborted: {}", e);
        std::process::exit(1);
    });

    eprintln!("\r                                    "); // clear progress line
    println!("{}", result.summary());
}
