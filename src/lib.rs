pub mod engine;
pub mod error;
pub mod games;

pub use error::{GameError, ProfileError};
pub use games::labyrinth::facade::LabyrinthFacade;
