use std::path::PathBuf;

use thiserror::Error;

use crate::games::labyrinth::game::GameState;
use crate::games::labyrinth::types::{Arrow, Position};

/// Rejected game operations. None of these leave the game partially updated.
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("No game in progress")]
    NoGame,
    #[error("Human player count must be between 1 and 4, got {0}")]
    InvalidHumanCount(usize),
    #[error("A game needs exactly 4 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("Game has already been started")]
    AlreadyStarted,
    #[error("Expected state {expected:?} but the game is in {actual:?}")]
    WrongPhase {
        expected: GameState,
        actual: GameState,
    },
    #[error("{0} is not an insertion point of this board")]
    UnknownArrow(Arrow),
    #[error("Inserting at {0} would reverse the previous insertion")]
    ReversedInsertion(Arrow),
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("Position {to} is not reachable from {from}")]
    UnreachableDestination { from: Position, to: Position },
    #[error("Player {0} is not controlled by a strategy")]
    NotRobotTurn(usize),
}

/// Failures loading strategy profiles from TOML.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
