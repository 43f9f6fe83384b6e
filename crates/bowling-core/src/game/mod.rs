pub mod bowling_game;
pub mod serialization;
