//! Reversible turn commands. Each command captures what it needs to undo
//! itself when it is applied.

use super::board::Board;
use super::game::Game;
use super::types::{Arrow, Direction, Position};
use crate::engine::history::Reversible;
use crate::error::GameError;

#[derive(Debug, Clone)]
struct InsertionSnapshot {
    board: Board,
    positions: Vec<Position>,
}

#[derive(Debug, Clone, Copy)]
struct MoveSnapshot {
    player_index: usize,
    position: Position,
    achieved: bool,
}

/// Orient the spare and insert it at `arrow`.
#[derive(Debug, Clone)]
pub struct InsertTile {
    arrow: Arrow,
    orientation: Direction,
    snapshot: Option<InsertionSnapshot>,
}

impl InsertTile {
    pub fn new(arrow: Arrow, orientation: Direction) -> Self {
        Self {
            arrow,
            orientation,
            snapshot: None,
        }
    }

    pub fn arrow(&self) -> Arrow {
        self.arrow
    }
}

impl Reversible<Game> for InsertTile {
    type Error = GameError;

    fn apply(&mut self, game: &mut Game) -> Result<(), GameError> {
        let snapshot = InsertionSnapshot {
            board: game.board().clone(),
            positions: game.players().iter().map(|p| p.position()).collect(),
        };
        game.perform_insertion(self.arrow, self.orientation)?;
        self.snapshot = Some(snapshot);
        Ok(())
    }

    fn revert(&mut self, game: &mut Game) {
        if let Some(snapshot) = self.snapshot.take() {
            game.restore_insertion(snapshot.board, &snapshot.positions);
        }
    }
}

/// Move the current player to `destination`.
#[derive(Debug, Clone)]
pub struct MovePlayer {
    destination: Position,
    snapshot: Option<MoveSnapshot>,
}

impl MovePlayer {
    pub fn new(destination: Position) -> Self {
        Self {
            destination,
            snapshot: None,
        }
    }

    pub fn destination(&self) -> Position {
        self.destination
    }
}

impl Reversible<Game> for MovePlayer {
    type Error = GameError;

    fn apply(&mut self, game: &mut Game) -> Result<(), GameError> {
        let player_index = game.current_player_index();
        let position = game.current_player().position();
        let achieved = game.perform_move(self.destination)?;
        self.snapshot = Some(MoveSnapshot {
            player_index,
            position,
            achieved: achieved.is_some(),
        });
        Ok(())
    }

    fn revert(&mut self, game: &mut Game) {
        if let Some(snapshot) = self.snapshot.take() {
            game.restore_move(snapshot.player_index, snapshot.position, snapshot.achieved);
        }
    }
}

/// A full turn: insertion then move, undone in reverse order.
#[derive(Debug, Clone)]
pub struct TurnCommand {
    insert: InsertTile,
    movement: MovePlayer,
}

impl TurnCommand {
    pub fn new(arrow: Arrow, orientation: Direction, destination: Position) -> Self {
        Self::from_parts(InsertTile::new(arrow, orientation), MovePlayer::new(destination))
    }

    /// Join an insertion and a move into one turn. Either may already have
    /// been applied.
    pub fn from_parts(insert: InsertTile, movement: MovePlayer) -> Self {
        Self { insert, movement }
    }

    pub fn arrow(&self) -> Arrow {
        self.insert.arrow()
    }

    pub fn destination(&self) -> Position {
        self.movement.destination()
    }
}

impl Reversible<Game> for TurnCommand {
    type Error = GameError;

    /// If the move is rejected the insertion is rolled back, so a failed turn
    /// leaves the game as it found it.
    fn apply(&mut self, game: &mut Game) -> Result<(), GameError> {
        self.insert.apply(game)?;
        if let Err(err) = self.movement.apply(game) {
            self.insert.revert(game);
            return Err(err);
        }
        Ok(())
    }

    fn revert(&mut self, game: &mut Game) {
        self.movement.revert(game);
        self.insert.revert(game);
    }
}
