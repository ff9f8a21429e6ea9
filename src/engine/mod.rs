pub mod arena;
pub mod history;
pub mod observer;
pub mod profiles;
