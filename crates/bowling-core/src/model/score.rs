use crate::model::frame::{Frame, FrameKind};
use crate::model::pins::Pins;

pub const FRAMES_PER_GAME: u8 = 10;

const ALL_PINS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameStep {
    kind: FrameKind,
    bonus: u32,
    score: u32,
}

/// Pins at `index`, or zero when the roll has not been recorded.
fn pins_at(rolls: &[Pins], index: usize) -> u32 {
    rolls.get(index).copied().map_or(0, u32::from)
}

fn is_strike(rolls: &[Pins], cursor: usize) -> bool {
    rolls.get(cursor).is_some_and(|pins| pins.is_strike())
}

fn is_spare(rolls: &[Pins], cursor: usize) -> bool {
    cursor + 1 < rolls.len() && pins_at(rolls, cursor) + pins_at(rolls, cursor + 1) == ALL_PINS
}

fn step(rolls: &[Pins], cursor: usize) -> FrameStep {
    if is_strike(rolls, cursor) {
        let bonus = pins_at(rolls, cursor + 1) + pins_at(rolls, cursor + 2);
        FrameStep {
            kind: FrameKind::Strike,
            bonus,
            score: ALL_PINS + bonus,
        }
    } else if is_spare(rolls, cursor) {
        let bonus = pins_at(rolls, cursor + 2);
        FrameStep {
            kind: FrameKind::Spare,
            bonus,
            score: ALL_PINS + bonus,
        }
    } else {
        FrameStep {
            kind: FrameKind::Open,
            bonus: 0,
            score: pins_at(rolls, cursor) + pins_at(rolls, cursor + 1),
        }
    }
}

/// Total score of a roll history, walking exactly ten frames.
///
/// Rolls past the tenth frame's needs are ignored; missing lookahead counts
/// as zero, so an incomplete history yields a lower bound.
pub fn score_rolls(rolls: &[Pins]) -> u32 {
    let mut total = 0;
    let mut cursor = 0;
    for _ in 0..FRAMES_PER_GAME {
        let step = step(rolls, cursor);
        total += step.score;
        cursor += step.kind.width();
    }
    total
}

/// Ten-frame scorecard for a roll history, using the same walk as [`score_rolls`].
pub fn frame_breakdown(rolls: &[Pins]) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(FRAMES_PER_GAME as usize);
    let mut cursor = 0;
    let mut running_total = 0;

    for number in 1..=FRAMES_PER_GAME {
        let step = step(rolls, cursor);
        let width = step.kind.width();
        let needed = width + step.kind.bonus_rolls();
        let shown = if number == FRAMES_PER_GAME {
            needed
        } else {
            width
        };

        let start = cursor.min(rolls.len());
        let end = (cursor + shown).min(rolls.len());
        running_total += step.score;

        frames.push(Frame {
            number,
            kind: step.kind,
            rolls: rolls[start..end].to_vec(),
            bonus: step.bonus,
            score: step.score,
            running_total,
            complete: cursor + needed <= rolls.len(),
        });

        cursor += width;
    }

    frames
}
