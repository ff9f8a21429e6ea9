//! Robot-vs-robot arena runner.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::engine::profiles::StrategyProfilesFile;
use crate::error::GameError;
use crate::games::labyrinth::facade::LabyrinthFacade;
use crate::games::labyrinth::game::Move;
use crate::games::labyrinth::player::{PlayerColor, PLAYER_COUNT};
use crate::games::labyrinth::strategy::{RandomStrategy, Strategy};

#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub num_games: usize,
    pub base_seed: u64,
    pub simplified: bool,
    /// Games still running after this many turns count as unfinished.
    pub max_turns: usize,
    pub difficulty: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            base_seed: 42,
            simplified: true,
            max_turns: 2000,
            difficulty: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    pub seed: u64,
    pub winner: Option<usize>,
    pub turns: usize,
    pub duration_ms: f64,
}

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Default)]
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: [usize; PLAYER_COUNT],
    pub unfinished: usize,
    pub turns: Vec<usize>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn from_outcomes(outcomes: &[GameOutcome]) -> Self {
        let mut result = ArenaResult {
            num_games: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.winner {
                Some(seat) if seat < PLAYER_COUNT => result.wins[seat] += 1,
                _ => result.unfinished += 1,
            }
            result.turns.push(outcome.turns);
            result.game_durations_ms.push(outcome.duration_ms);
        }
        result
    }

    pub fn win_rate(&self, seat: usize) -> f64 {
        self.wins.get(seat).copied().unwrap_or(0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_turns(&self) -> f64 {
        if self.turns.is_empty() {
            return 0.0;
        }
        self.turns.iter().sum::<usize>() as f64 / self.turns.len() as f64
    }

    pub fn turns_stddev(&self) -> f64 {
        if self.turns.len() < 2 {
            return 0.0;
        }
        let avg = self.avg_turns();
        let variance = self
            .turns
            .iter()
            .map(|&t| (t as f64 - avg).powi(2))
            .sum::<f64>()
            / (self.turns.len() - 1) as f64;
        variance.sqrt()
    }

    /// Wilson score interval for a seat's win rate.
    pub fn confidence_interval_95(&self, seat: usize) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(seat);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        for (seat, wins) in self.wins.iter().enumerate() {
            let (ci_lo, ci_hi) = self.confidence_interval_95(seat);
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]",
                format!("{:?}", PlayerColor::from_seat(seat)),
                wins,
                self.win_rate(seat) * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
            ));
        }
        lines.push(format!("  {:>12}: {}", "Unfinished", self.unfinished));
        lines.push(format!(
            "  Avg turns: {:.1} +/- {:.1}",
            self.avg_turns(),
            self.turns_stddev()
        ));
        if !self.game_durations_ms.is_empty() {
            let total_ms = self.game_durations_ms.iter().sum::<f64>();
            let avg_ms = total_ms / self.game_durations_ms.len() as f64;
            lines.push(format!("  Avg game: {:.1}ms  |  Total: {:.1}s", avg_ms, total_ms / 1000.0));
        }
        lines.join("\n")
    }
}

/// Play `config.num_games` games in parallel, one seed per game.
pub fn run_arena(
    config: &ArenaConfig,
    profiles: &StrategyProfilesFile,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> Result<ArenaResult, GameError> {
    let completed = AtomicUsize::new(0);
    let outcomes = (0..config.num_games)
        .into_par_iter()
        .map(|game_idx| {
            let seed = config.base_seed.wrapping_add(game_idx as u64);
            let outcome = play_one_game(seed, config, profiles);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress_callback {
                cb(done, config.num_games);
            }
            outcome
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ArenaResult::from_outcomes(&outcomes))
}

/// One game: seat 0 goes through the human turn API with a local random
/// strategy, the other seats are robots from the configured profile.
pub fn play_one_game(
    seed: u64,
    config: &ArenaConfig,
    profiles: &StrategyProfilesFile,
) -> Result<GameOutcome, GameError> {
    let t0 = Instant::now();
    let mut facade = LabyrinthFacade::seeded(seed).with_profiles(profiles.clone());
    facade.start_new_game(1, config.difficulty, config.simplified)?;
    let mut local = RandomStrategy::new(seed);

    let mut turns = 0;
    while facade.is_game_running() && turns < config.max_turns {
        if facade.is_current_player_robot() {
            facade.play_ai_turn()?;
        } else {
            play_local_turn(&mut facade, &mut local)?;
        }
        turns += 1;
    }

    let winner = facade.winner_id();
    if winner.is_none() {
        tracing::debug!(seed, turns, "game unfinished, abandoning");
        facade.abandon();
    }
    Ok(GameOutcome {
        seed,
        winner,
        turns,
        duration_ms: t0.elapsed().as_secs_f64() * 1000.0,
    })
}

/// Play the current seat's turn with `strategy`, turning the spare through
/// the facade until it matches the chosen rotation.
pub fn play_local_turn(
    facade: &mut LabyrinthFacade,
    strategy: &mut dyn Strategy,
) -> Result<Move, GameError> {
    let game = facade.game().ok_or(GameError::NoGame)?;
    let mv = strategy.choose_move(game.board(), game.current_player(), game.spare_tile());
    for _ in 0..4 {
        if facade.spare_tile().map(|t| t.orientation()) == Some(mv.rotation) {
            break;
        }
        facade.rotate_spare_tile();
    }
    facade.play_turn(mv.arrow, mv.destination)?;
    Ok(mv)
}
