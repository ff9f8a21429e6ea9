//! Single entry point for display layers: owns the game, its undo history,
//! robot strategy selection and change notification.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::Board;
use super::commands::{InsertTile, MovePlayer, TurnCommand};
use super::game::{Game, GameSnapshot, GameState, Move, WinCondition};
use super::player::{Player, PLAYER_COUNT};
use super::strategy::create_strategy;
use super::tiles::Tile;
use super::types::{Arrow, Position};
use crate::engine::history::{CommandHistory, Reversible};
use crate::engine::observer::{Observer, ObserverList};
use crate::engine::profiles::StrategyProfilesFile;
use crate::error::GameError;

pub struct LabyrinthFacade {
    rng: StdRng,
    profiles: StrategyProfilesFile,
    game: Option<Game>,
    history: CommandHistory<TurnCommand>,
    /// Insertion of the turn in progress, committed to the history once the
    /// move follows.
    pending: Option<InsertTile>,
    observers: ObserverList,
}

impl Default for LabyrinthFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl LabyrinthFacade {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Board setup, card dealing and robot play all derive from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            profiles: StrategyProfilesFile::default(),
            game: None,
            history: CommandHistory::new(),
            pending: None,
            observers: ObserverList::new(),
        }
    }

    pub fn with_profiles(mut self, profiles: StrategyProfilesFile) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn add_observer(&mut self, observer: Arc<dyn Observer>) -> bool {
        self.observers.add(observer)
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn Observer>) -> bool {
        self.observers.remove(observer)
    }

    /// Replace any current game with a fresh one. Seats `human_count..4` are
    /// robots playing the profile selected by `ai_difficulty`.
    pub fn start_new_game(
        &mut self,
        human_count: usize,
        ai_difficulty: u32,
        simplified: bool,
    ) -> Result<(), GameError> {
        // Checked before anything is drawn from the rng.
        if !(1..=PLAYER_COUNT).contains(&human_count) {
            return Err(GameError::InvalidHumanCount(human_count));
        }
        let profile = self.profiles.profile_for(ai_difficulty);
        let seeds: [u64; 4] = self.rng.gen();
        let mut game = Game::new(
            human_count,
            WinCondition::from_simplified(simplified),
            &mut self.rng,
            |seat| create_strategy(&profile, seeds[seat]),
        )?;
        game.start()?;

        tracing::info!(
            humans = human_count,
            difficulty = ai_difficulty,
            strategy = %profile.strategy_type,
            simplified,
            "new game"
        );
        self.game = Some(game);
        self.history.clear();
        self.pending = None;
        self.observers.notify();
        Ok(())
    }

    // --- Queries ---

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn state(&self) -> GameState {
        self.game.as_ref().map_or(GameState::NotStarted, Game::state)
    }

    pub fn is_game_running(&self) -> bool {
        self.state().is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_over()
    }

    pub fn is_insert_phase(&self) -> bool {
        self.state() == GameState::WaitingInsert
    }

    pub fn is_move_phase(&self) -> bool {
        self.state() == GameState::WaitingMove
    }

    pub fn winner(&self) -> Option<&Player> {
        self.game.as_ref()?.winner()
    }

    pub fn winner_id(&self) -> Option<usize> {
        self.game.as_ref()?.winner_id()
    }

    pub fn board(&self) -> Option<&Board> {
        self.game.as_ref().map(Game::board)
    }

    pub fn spare_tile(&self) -> Option<&Tile> {
        self.game.as_ref().map(Game::spare_tile)
    }

    pub fn valid_arrows(&self) -> Vec<Arrow> {
        self.game.as_ref().map(Game::valid_arrows).unwrap_or_default()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.game.as_ref().map(Game::current_player)
    }

    pub fn players(&self) -> &[Player] {
        match &self.game {
            Some(game) => game.players(),
            None => &[],
        }
    }

    pub fn is_current_player_robot(&self) -> bool {
        self.current_player().is_some_and(Player::is_robot)
    }

    pub fn reachable_positions(&self) -> Vec<Position> {
        self.game.as_ref().map(Game::reachable_positions).unwrap_or_default()
    }

    pub fn can_insert(&self, arrow: Arrow) -> bool {
        self.game.as_ref().is_some_and(|g| g.can_insert(arrow))
    }

    pub fn can_move(&self, destination: Position) -> bool {
        self.game.as_ref().is_some_and(|g| g.can_move(destination))
    }

    /// Undo covers a pending insertion as well as committed turns.
    pub fn can_undo(&self) -> bool {
        self.is_game_running() && (self.pending.is_some() || self.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.is_game_running() && self.pending.is_none() && self.history.can_redo()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.game.as_ref().map(Game::snapshot)
    }

    // --- Mutations ---

    /// Rotate the spare a quarter turn. Only effective during the insert phase.
    pub fn rotate_spare_tile(&mut self) -> bool {
        let rotated = self.game.as_mut().is_some_and(Game::rotate_spare);
        if rotated {
            self.observers.notify();
        }
        rotated
    }

    /// First half of a human turn: insert the spare as currently oriented.
    pub fn insert_tile(&mut self, arrow: Arrow) -> Result<(), GameError> {
        let game = self.game.as_mut().ok_or(GameError::NoGame)?;
        let mut insert = InsertTile::new(arrow, game.spare_tile().orientation());
        insert.apply(game)?;
        self.pending = Some(insert);
        self.observers.notify();
        Ok(())
    }

    /// Second half of a human turn. The completed turn becomes one undo step.
    pub fn move_player(&mut self, destination: Position) -> Result<(), GameError> {
        let game = self.game.as_mut().ok_or(GameError::NoGame)?;
        let mut movement = MovePlayer::new(destination);
        movement.apply(game)?;
        match self.pending.take() {
            Some(insert) => self.history.push_executed(TurnCommand::from_parts(insert, movement)),
            None => tracing::warn!(%destination, "move without a recorded insertion"),
        }
        self.observers.notify();
        Ok(())
    }

    /// Insert at `arrow` and move to `destination` as one undoable turn. If
    /// the destination is unreachable after the insertion, nothing changes.
    pub fn play_turn(&mut self, arrow: Arrow, destination: Position) -> Result<(), GameError> {
        let game = self.game.as_mut().ok_or(GameError::NoGame)?;
        let orientation = game.spare_tile().orientation();
        self.history
            .execute_command(TurnCommand::new(arrow, orientation, destination), game)?;
        self.observers.notify();
        Ok(())
    }

    /// Let the current robot play its whole turn. Returns the move played.
    pub fn play_ai_turn(&mut self) -> Result<Move, GameError> {
        let game = self.game.as_mut().ok_or(GameError::NoGame)?;
        if game.state() != GameState::WaitingInsert {
            return Err(GameError::WrongPhase {
                expected: GameState::WaitingInsert,
                actual: game.state(),
            });
        }
        let seat = game.current_player_index();
        let mv = game.choose_robot_move()?;
        let turn = TurnCommand::new(mv.arrow, mv.rotation, mv.destination);
        self.history.execute_command(turn, game)?;
        tracing::debug!(
            player = seat,
            arrow = %mv.arrow,
            destination = %mv.destination,
            "robot turn played"
        );
        self.observers.notify();
        Ok(mv)
    }

    /// Take back the pending insertion, or else the last full turn. Returns
    /// false when there is nothing to undo or the game is not running.
    pub fn undo(&mut self) -> bool {
        let Some(game) = self.game.as_mut().filter(|g| g.is_running()) else {
            return false;
        };
        let undone = match self.pending.take() {
            Some(mut insert) => {
                insert.revert(game);
                true
            }
            None => self.history.undo(game),
        };
        if undone {
            tracing::debug!(undo = self.history.undo_count(), redo = self.history.redo_count(), "undo");
            self.observers.notify();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(game) = self.game.as_mut().filter(|g| g.is_running()) else {
            return false;
        };
        let redone = self.history.redo(game);
        if redone {
            tracing::debug!(undo = self.history.undo_count(), redo = self.history.redo_count(), "redo");
            self.observers.notify();
        }
        redone
    }

    pub fn abandon(&mut self) -> bool {
        let abandoned = self.game.as_mut().is_some_and(Game::abandon);
        if abandoned {
            self.history.clear();
            self.pending = None;
            self.observers.notify();
        }
        abandoned
    }
}
