use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bowling_core::game::bowling_game::Game;
use bowling_core::model::frame::Frame;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{GameConfig, ReplayConfig, ResolvedOutputs};
use crate::logging::telemetry_path;
use crate::report::{ReportError, write_summary_markdown};

/// Replays every scripted game in a configuration through the scorer.
pub struct ReplayRunner {
    config: ReplayConfig,
    outputs: ResolvedOutputs,
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub rolls_rejected: usize,
    pub mismatches: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

/// A roll the scorer refused, with its position in the fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRoll {
    pub index: usize,
    pub value: f64,
    pub error: String,
}

/// Result of replaying one scripted game.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub name: String,
    pub game: Game,
    pub rejected: Vec<RejectedRoll>,
    pub expected_score: Option<u32>,
}

impl GameOutcome {
    pub fn score(&self) -> u32 {
        self.game.score()
    }

    /// `None` when the fixture gives no expected score.
    pub fn matched(&self) -> Option<bool> {
        self.expected_score.map(|expected| expected == self.score())
    }
}

#[derive(Serialize)]
struct GameRow<'a> {
    run_id: &'a str,
    game: &'a str,
    rolls_recorded: usize,
    rejected: &'a [RejectedRoll],
    score: u32,
    expected_score: Option<u32>,
    matched: Option<bool>,
    complete: bool,
    frame_totals: Vec<u32>,
}

impl ReplayRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ReplayConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        }
    }

    /// Replay all games, streaming one JSONL row per game to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut outcomes = Vec::with_capacity(self.config.games.len());

        for game_config in &self.config.games {
            let outcome = self.play_game(game_config);
            write_game_row(&mut writer, &self.config.run_id, &outcome)?;
            outcomes.push(outcome);
        }

        writer.flush()?;
        write_summary_markdown(&self.outputs.summary_md, &self.config.run_id, &outcomes)?;

        let rolls_rejected = outcomes.iter().map(|o| o.rejected.len()).sum();
        let mismatches = outcomes
            .iter()
            .filter(|o| o.matched() == Some(false))
            .count();

        Ok(RunSummary {
            games_played: outcomes.len(),
            rolls_rejected,
            mismatches,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path: self
                .logging_enabled
                .then(|| telemetry_path(&self.outputs)),
        })
    }

    fn play_game(&self, game_config: &GameConfig) -> GameOutcome {
        let mut game = Game::new();
        let mut rejected = Vec::new();

        for (index, entry) in game_config.rolls.iter().copied().enumerate() {
            if let Err(err) = entry.record(&mut game) {
                if self.logging_enabled {
                    event!(
                        target: "bowling_bench::replay",
                        Level::WARN,
                        game = game_config.name.as_str(),
                        index,
                        value = %entry,
                        "roll rejected"
                    );
                }
                rejected.push(RejectedRoll {
                    index,
                    value: err.value(),
                    error: err.to_string(),
                });
            }
        }

        let outcome = GameOutcome {
            name: game_config.name.clone(),
            game,
            rejected,
            expected_score: game_config.expected_score,
        };

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            event!(
                target: "bowling_bench::replay",
                Level::INFO,
                run_id = self.config.run_id.as_str(),
                game = outcome.name.as_str(),
                rolls = outcome.game.len(),
                score = outcome.score(),
                expected = ?outcome.expected_score,
                complete = outcome.game.is_complete(),
                "game scored"
            );
        }

        outcome
    }
}

fn write_game_row<W: Write>(
    writer: &mut W,
    run_id: &str,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let frames = outcome.game.frames();
    let row = GameRow {
        run_id,
        game: &outcome.name,
        rolls_recorded: outcome.game.len(),
        rejected: &outcome.rejected,
        score: outcome.score(),
        expected_score: outcome.expected_score,
        matched: outcome.matched(),
        complete: frames.iter().all(Frame::is_complete),
        frame_totals: frames.iter().map(Frame::running_total).collect(),
    };
    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode result row: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Report(#[from] ReportError),
}
