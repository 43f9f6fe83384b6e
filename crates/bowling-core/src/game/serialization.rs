use super::bowling_game::Game;
use crate::model::pins::InvalidRollError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub rolls: Vec<i64>,
    /// Informational only; restore recomputes it from `rolls`.
    #[serde(default)]
    pub score: u32,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        GameSnapshot {
            rolls: game.rolls().iter().map(|p| i64::from(p.value())).collect(),
            score: game.score(),
        }
    }

    /// Replays every roll through [`Game::roll`], so out-of-range values are
    /// rejected exactly as they would be at the lane.
    pub fn restore(self) -> Result<Game, InvalidRollError> {
        let mut game = Game::new();
        for pins in self.rolls {
            game.roll(pins)?;
        }
        Ok(game)
    }

    pub fn to_json(game: &Game) -> serde_json::Result<String> {
        let snapshot = Self::capture(game);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
