use core::fmt;

use crate::model::frame::Frame;
use crate::model::pins::{InvalidRollError, Pins};
use crate::model::score::{frame_breakdown, score_rolls};

/// A single ten-pin game: the rolls recorded so far, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    rolls: Vec<Pins>,
}

impl Game {
    pub const fn new() -> Self {
        Self { rolls: Vec::new() }
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = Pins>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Record a roll. Values outside `0..=10` are rejected and leave the
    /// history untouched.
    ///
    /// Each roll is checked on its own; two rolls of one frame summing past
    /// ten are accepted.
    pub fn roll(&mut self, pins: i64) -> Result<(), InvalidRollError> {
        self.try_roll(pins)
    }

    /// Record a roll from any raw value `Pins` can be validated from,
    /// such as an `f64` read out of a fixture.
    pub fn try_roll<T>(&mut self, raw: T) -> Result<(), InvalidRollError>
    where
        T: Copy + fmt::Display,
        Pins: TryFrom<T, Error = InvalidRollError>,
    {
        let pins = Pins::try_from(raw).inspect_err(|err| {
            tracing::debug!(value = %raw, recorded = self.rolls.len(), "{err}");
        })?;
        self.roll_pins(pins);
        Ok(())
    }

    pub fn roll_pins(&mut self, pins: Pins) {
        self.rolls.push(pins);
    }

    pub fn rolls(&self) -> &[Pins] {
        &self.rolls
    }

    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    pub fn score(&self) -> u32 {
        let score = score_rolls(&self.rolls);
        tracing::trace!(rolls = self.rolls.len(), score, "scored game");
        score
    }

    pub fn frames(&self) -> Vec<Frame> {
        frame_breakdown(&self.rolls)
    }

    /// All ten frames, bonus rolls included, have been played.
    pub fn is_complete(&self) -> bool {
        self.frames().iter().all(Frame::is_complete)
    }
}
