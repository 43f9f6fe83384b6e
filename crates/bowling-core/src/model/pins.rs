use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection raised when a roll is not a whole number of pins in `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidRollError {
    #[error("invalid roll value: {0}")]
    OutOfRange(i64),
    #[error("invalid roll value: {0}")]
    FloatOutOfRange(f64),
    #[error("invalid roll value: {0}")]
    NotInteger(f64),
}

impl InvalidRollError {
    /// The offending value as it was supplied.
    pub fn value(&self) -> f64 {
        match self {
            InvalidRollError::OutOfRange(value) => *value as f64,
            InvalidRollError::FloatOutOfRange(value) | InvalidRollError::NotInteger(value) => {
                *value
            }
        }
    }
}

/// Pins knocked down by a single roll. Always within `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Pins(u8);

impl Pins {
    pub const GUTTER: Pins = Pins(0);
    pub const STRIKE: Pins = Pins(10);

    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::STRIKE.0 {
            Some(Pins(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_strike(self) -> bool {
        self.0 == Self::STRIKE.0
    }
}

impl TryFrom<i64> for Pins {
    type Error = InvalidRollError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Pins::new)
            .ok_or(InvalidRollError::OutOfRange(value))
    }
}

impl TryFrom<f64> for Pins {
    type Error = InvalidRollError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(InvalidRollError::NotInteger(value));
        }
        if !(0.0..=f64::from(Self::STRIKE.0)).contains(&value) {
            return Err(InvalidRollError::FloatOutOfRange(value));
        }
        Ok(Pins(value as u8))
    }
}

impl From<Pins> for u8 {
    fn from(pins: Pins) -> Self {
        pins.0
    }
}

impl From<Pins> for u32 {
    fn from(pins: Pins) -> Self {
        pins.0 as u32
    }
}

impl fmt::Display for Pins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
