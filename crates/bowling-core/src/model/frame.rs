use crate::model::pins::Pins;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Strike,
    Spare,
    Open,
}

impl FrameKind {
    /// Number of rolls this kind of frame occupies before the next frame starts.
    pub const fn width(self) -> usize {
        match self {
            FrameKind::Strike => 1,
            FrameKind::Spare | FrameKind::Open => 2,
        }
    }

    /// Rolls that count as bonus for this frame, read past its own rolls.
    pub const fn bonus_rolls(self) -> usize {
        match self {
            FrameKind::Strike => 2,
            FrameKind::Spare => 1,
            FrameKind::Open => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FrameKind::Strike => "strike",
            FrameKind::Spare => "spare",
            FrameKind::Open => "open",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored frame, derived from the roll history on demand.
///
/// The tenth frame lists the bonus rolls it consumes alongside its own, so it
/// may hold up to three rolls. Rolls that have not been recorded yet are
/// absent and count as zero in `score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub(crate) number: u8,
    pub(crate) kind: FrameKind,
    pub(crate) rolls: Vec<Pins>,
    pub(crate) bonus: u32,
    pub(crate) score: u32,
    pub(crate) running_total: u32,
    pub(crate) complete: bool,
}

impl Frame {
    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn rolls(&self) -> &[Pins] {
        &self.rolls
    }

    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn running_total(&self) -> u32 {
        self.running_total
    }

    /// Every roll this frame needs, lookahead included, has been recorded.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_final(&self) -> bool {
        self.number == crate::model::score::FRAMES_PER_GAME
    }
}
