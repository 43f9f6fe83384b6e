#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::bowling_game::Game;
pub use game::serialization::GameSnapshot;
pub use model::frame::{Frame, FrameKind};
pub use model::pins::{InvalidRollError, Pins};
