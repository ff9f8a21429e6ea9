//! Move selection for robot players.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::board::Board;
use super::game::Move;
use super::player::Player;
use super::tiles::Tile;
use super::types::Direction;
use crate::engine::profiles::StrategyProfile;

/// Chooses a full turn for a robot. Must not touch the game; the board and
/// spare are read-only views of the live state.
pub trait Strategy: Send + Sync {
    fn choose_move(&mut self, board: &Board, player: &Player, spare: &Tile) -> Move;

    fn name(&self) -> &str;
}

/// Uniform choice of arrow, rotation and reachable destination.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, board: &Board, player: &Player, spare: &Tile) -> Move {
        let arrows = board.valid_arrows();
        let Some(&arrow) = arrows.choose(&mut self.rng) else {
            unreachable!("at most one of the insertion arrows is ever forbidden");
        };
        let rotation = Direction::from_index(self.rng.gen_range(0..4));

        // Play the insertion out on a copy to see where the pawn can go.
        let mut simulated = board.clone();
        let mut tile = *spare;
        tile.set_orientation(rotation);
        *simulated.spare_tile_mut() = tile;
        let start = arrow.shift_position(player.position(), simulated.size());

        let destination = match simulated.insert_and_shift(arrow) {
            Ok(_) => simulated
                .reachable_positions(start)
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(start),
            Err(_) => start,
        };

        Move {
            arrow,
            rotation,
            destination,
        }
    }

    fn name(&self) -> &str {
        "Random (Level 0)"
    }
}

/// Build the strategy a profile names. Unknown types fall back to random.
pub fn create_strategy(profile: &StrategyProfile, seed: u64) -> Box<dyn Strategy> {
    match profile.strategy_type.as_str() {
        "random" => Box::new(RandomStrategy::new(seed)),
        other => {
            tracing::warn!(strategy_type = other, "unknown strategy type, using random");
            Box::new(RandomStrategy::new(seed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::labyrinth::game::{Game, GameState, WinCondition};

    fn started_game(seed: u64) -> Game {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(1, WinCondition::Simplified, &mut rng, |seat| {
            Box::new(RandomStrategy::new(seed * 10 + seat as u64))
        })
        .unwrap();
        game.start().unwrap();
        game
    }

    #[test]
    fn test_name() {
        assert_eq!(RandomStrategy::new(0).name(), "Random (Level 0)");
    }

    #[test]
    fn test_move_is_legal_and_inputs_untouched() {
        for seed in 0..30 {
            let game = started_game(seed);
            let board = game.board().clone();
            let player = game.current_player().clone();
            let mut strategy = RandomStrategy::new(seed);

            let mv = strategy.choose_move(&board, &player, board.spare_tile());
            assert_eq!(&board, game.board());
            assert!(board.can_insert(mv.arrow));

            let mut after = board.clone();
            after.spare_tile_mut().set_orientation(mv.rotation);
            after.insert_and_shift(mv.arrow).unwrap();
            let start = mv.arrow.shift_position(player.position(), after.size());
            assert!(after.is_reachable(start, mv.destination), "seed {seed}: {mv:?}");
        }
    }

    #[test]
    fn test_moves_apply_cleanly() {
        let mut game = started_game(7);
        for _ in 0..40 {
            if game.state() != GameState::WaitingInsert {
                break;
            }
            let mut strategy = RandomStrategy::new(game.current_player_index() as u64);
            let mv = strategy.choose_move(game.board(), game.current_player(), game.spare_tile());
            game.perform_insertion(mv.arrow, mv.rotation).unwrap();
            game.perform_move(mv.destination).unwrap();
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let game = started_game(11);
        let mut a = RandomStrategy::new(42);
        let mut b = RandomStrategy::new(42);
        let board = game.board();
        let player = game.current_player();
        assert_eq!(
            a.choose_move(board, player, board.spare_tile()),
            b.choose_move(board, player, board.spare_tile())
        );
    }

    #[test]
    fn test_create_strategy_fallback() {
        let profile = StrategyProfile {
            description: "unknown".into(),
            strategy_type: "minimax".into(),
        };
        assert_eq!(create_strategy(&profile, 1).name(), "Random (Level 0)");
    }
}
