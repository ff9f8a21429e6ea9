//! Turn state machine: insertion phase, move phase, objective tracking and
//! win detection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::player::{deal_objectives, ObjectiveCard, Player, PLAYER_COUNT};
use super::strategy::Strategy;
use super::tiles::Tile;
use super::types::{Arrow, Direction, Position, BOARD_SIZE};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    NotStarted,
    WaitingInsert,
    WaitingMove,
    Finished,
    Aborted,
}

impl GameState {
    /// A turn is in progress: tiles can be inserted or pawns moved.
    pub fn is_running(self) -> bool {
        matches!(self, GameState::WaitingInsert | GameState::WaitingMove)
    }

    pub fn is_over(self) -> bool {
        matches!(self, GameState::Finished | GameState::Aborted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Win as soon as the objective backlog is empty.
    #[default]
    Simplified,
    /// Empty backlog and back on the start corner.
    Standard,
}

impl WinCondition {
    pub fn from_simplified(simplified: bool) -> Self {
        if simplified {
            WinCondition::Simplified
        } else {
            WinCondition::Standard
        }
    }
}

/// One full turn as chosen by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub arrow: Arrow,
    pub rotation: Direction,
    pub destination: Position,
}

/// Serialisable view of a game for logging, JSON output and state comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub win_condition: WinCondition,
    pub current_player: usize,
    pub winner: Option<usize>,
    pub board: Board,
    pub players: Vec<Player>,
}

pub struct Game {
    board: Board,
    players: Vec<Player>,
    current: usize,
    state: GameState,
    winner: Option<usize>,
    win_condition: WinCondition,
    /// Seat-indexed; `Some` for robot seats.
    strategies: Vec<Option<Box<dyn Strategy>>>,
}

impl Game {
    /// Seed the board and deal the objective cards. Seats `human_count..4`
    /// are robots driven by the strategy `robot_strategy` builds for them.
    pub fn new<R, F>(
        human_count: usize,
        win_condition: WinCondition,
        rng: &mut R,
        mut robot_strategy: F,
    ) -> Result<Self, GameError>
    where
        R: Rng + ?Sized,
        F: FnMut(usize) -> Box<dyn Strategy>,
    {
        if !(1..=PLAYER_COUNT).contains(&human_count) {
            return Err(GameError::InvalidHumanCount(human_count));
        }

        let board = Board::generate(rng);
        let players: Vec<Player> = deal_objectives(rng)
            .into_iter()
            .enumerate()
            .map(|(seat, hand)| Player::new(seat, hand, seat >= human_count))
            .collect();
        let strategies = (0..PLAYER_COUNT)
            .map(|seat| (seat >= human_count).then(|| robot_strategy(seat)))
            .collect();

        Ok(Self {
            board,
            players,
            current: 0,
            state: GameState::NotStarted,
            winner: None,
            win_condition,
            strategies,
        })
    }

    /// Build a not-yet-started game around an explicit board and players.
    /// Robot seats get no strategy until [`Game::set_strategy`] is called.
    pub fn from_parts(
        board: Board,
        players: Vec<Player>,
        win_condition: WinCondition,
    ) -> Result<Self, GameError> {
        if players.len() != PLAYER_COUNT {
            return Err(GameError::InvalidPlayerCount(players.len()));
        }
        let strategies = players.iter().map(|_| None).collect();
        Ok(Self {
            board,
            players,
            current: 0,
            state: GameState::NotStarted,
            winner: None,
            win_condition,
            strategies,
        })
    }

    pub fn set_strategy(&mut self, seat: usize, strategy: Box<dyn Strategy>) {
        if let Some(slot) = self.strategies.get_mut(seat) {
            *slot = Some(strategy);
        }
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        self.state = GameState::WaitingInsert;
        self.current = 0;
        self.winner = None;
        tracing::info!(
            robots = self.players.iter().filter(|p| p.is_robot()).count(),
            win_condition = ?self.win_condition,
            "game started"
        );
        Ok(())
    }

    // --- Queries ---

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_over()
    }

    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn spare_tile(&self) -> &Tile {
        self.board.spare_tile()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn winner_id(&self) -> Option<usize> {
        self.winner
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.players.get(id))
    }

    pub fn strategy_name(&self, seat: usize) -> Option<&str> {
        self.strategies.get(seat)?.as_deref().map(|s| s.name())
    }

    pub fn can_insert(&self, arrow: Arrow) -> bool {
        self.state == GameState::WaitingInsert && self.board.can_insert(arrow)
    }

    pub fn can_move(&self, destination: Position) -> bool {
        self.state == GameState::WaitingMove
            && self.board.is_reachable(self.current_player().position(), destination)
    }

    /// Insertion points the anti-reversal rule leaves open, in any phase.
    /// Use [`Game::can_insert`] to also check the phase.
    pub fn valid_arrows(&self) -> Vec<Arrow> {
        self.board.valid_arrows()
    }

    /// Cells the current player can walk to; empty outside the move phase.
    pub fn reachable_positions(&self) -> Vec<Position> {
        if self.state != GameState::WaitingMove {
            return Vec::new();
        }
        self.board.reachable_positions(self.current_player().position())
    }

    /// Whether `destination` holds the current player's top objective.
    pub fn would_achieve_objective(&self, destination: Position) -> bool {
        let target = self.current_player().current_objective();
        match self.board.get(destination).and_then(Tile::objective) {
            Some(objective) => target == Some(objective),
            None => false,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            win_condition: self.win_condition,
            current_player: self.current,
            winner: self.winner,
            board: self.board.clone(),
            players: self.players.clone(),
        }
    }

    // --- Mutations ---

    /// Rotate the spare a quarter turn clockwise. Only effective during the
    /// insert phase.
    pub fn rotate_spare(&mut self) -> bool {
        self.state == GameState::WaitingInsert && self.board.spare_tile_mut().rotate_clockwise()
    }

    /// Orient the spare, push it in at `arrow` and carry along every pawn
    /// standing on the shifted line.
    pub fn perform_insertion(&mut self, arrow: Arrow, orientation: Direction) -> Result<(), GameError> {
        self.expect_state(GameState::WaitingInsert)?;
        if !Arrow::all().contains(&arrow) {
            return Err(GameError::UnknownArrow(arrow));
        }
        if !self.board.can_insert(arrow) {
            return Err(GameError::ReversedInsertion(arrow));
        }

        self.board.spare_tile_mut().set_orientation(orientation);
        self.board.insert_and_shift(arrow)?;
        for player in &mut self.players {
            let shifted = arrow.shift_position(player.position(), BOARD_SIZE);
            player.set_position(shifted);
        }

        self.state = GameState::WaitingMove;
        tracing::debug!(player = self.current, %arrow, ?orientation, "tile inserted");
        Ok(())
    }

    /// Walk the current player to `destination`, collect the objective there
    /// if it is the one on top of their stack, then either finish the game or
    /// pass the turn. Returns the card achieved by this move.
    pub fn perform_move(&mut self, destination: Position) -> Result<Option<ObjectiveCard>, GameError> {
        self.expect_state(GameState::WaitingMove)?;
        if !destination.is_in_bounds(BOARD_SIZE) {
            return Err(GameError::OutOfBounds(destination));
        }
        let from = self.current_player().position();
        if !self.board.is_reachable(from, destination) {
            return Err(GameError::UnreachableDestination { from, to: destination });
        }

        let achieves = self.would_achieve_objective(destination);
        let player = &mut self.players[self.current];
        player.set_position(destination);
        tracing::debug!(player = player.id(), %from, to = %destination, "player moved");

        let achieved = if achieves { player.achieve_current() } else { None };
        if let Some(card) = achieved {
            tracing::debug!(
                player = player.id(),
                objective = ?card.objective,
                remaining = player.remaining_objectives(),
                "objective reached"
            );
        }

        if player.has_won(self.win_condition) {
            self.winner = Some(player.id());
            self.state = GameState::Finished;
            tracing::info!(winner = player.id(), name = player.name(), "game finished");
        } else {
            self.current = (self.current + 1) % self.players.len();
            self.state = GameState::WaitingInsert;
        }
        Ok(achieved)
    }

    /// Ask the current robot's strategy for its move. Does not apply it.
    pub fn choose_robot_move(&mut self) -> Result<Move, GameError> {
        if !self.state.is_running() {
            return Err(GameError::WrongPhase {
                expected: GameState::WaitingInsert,
                actual: self.state,
            });
        }
        let player = &self.players[self.current];
        let strategy = match self.strategies.get_mut(self.current) {
            Some(Some(strategy)) if player.is_robot() => strategy,
            _ => return Err(GameError::NotRobotTurn(self.current)),
        };
        Ok(strategy.choose_move(&self.board, player, self.board.spare_tile()))
    }

    /// Abort from any state short of an end state. Returns false if the game
    /// already ended.
    pub fn abandon(&mut self) -> bool {
        if self.state.is_over() {
            return false;
        }
        self.state = GameState::Aborted;
        tracing::info!(player = self.current, "game abandoned");
        true
    }

    // --- Restoration (used by commands) ---

    /// Put back the board and pawn positions captured before an insertion.
    pub(crate) fn restore_insertion(&mut self, board: Board, positions: &[Position]) {
        debug_assert_eq!(positions.len(), self.players.len());
        self.board = board;
        for (player, &pos) in self.players.iter_mut().zip(positions) {
            player.set_position(pos);
        }
        self.state = GameState::WaitingInsert;
    }

    /// Return to the move phase of `player_index`, standing on `position`,
    /// optionally handing back the objective that move achieved.
    pub(crate) fn restore_move(&mut self, player_index: usize, position: Position, returned_card: bool) {
        let player = &mut self.players[player_index];
        player.set_position(position);
        if returned_card {
            player.restore_last_achieved();
        }
        self.current = player_index;
        self.winner = None;
        self.state = GameState::WaitingMove;
    }

    fn expect_state(&self, expected: GameState) -> Result<(), GameError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.state,
            })
        }
    }
}
