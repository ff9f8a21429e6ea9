//! Labyrinth: four players slide corridor tiles into a 7x7 maze and race to
//! collect their objectives.

pub mod board;
pub mod commands;
pub mod facade;
pub mod game;
pub mod player;
pub mod strategy;
pub mod tiles;
pub mod types;

pub use board::Board;
pub use facade::LabyrinthFacade;
pub use game::{Game, GameSnapshot, GameState, Move, WinCondition};
pub use player::{ObjectiveCard, Player, PlayerColor};
pub use strategy::{create_strategy, RandomStrategy, Strategy};
pub use tiles::Tile;
pub use types::{Arrow, Direction, Objective, Position, TileType, BOARD_SIZE};
