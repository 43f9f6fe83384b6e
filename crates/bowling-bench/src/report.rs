use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::replay::GameOutcome;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Render the per-game results table.
pub fn render_summary_markdown(run_id: &str, outcomes: &[GameOutcome]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Replay summary: {run_id}");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Game | Rolls | Rejected | Score | Expected | Result | Complete |");
    let _ = writeln!(out, "|------|------:|---------:|------:|---------:|--------|----------|");

    for outcome in outcomes {
        let expected = outcome
            .expected_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());
        let result = match outcome.matched() {
            Some(true) => "ok",
            Some(false) => "MISMATCH",
            None => "-",
        };
        let complete = if outcome.game.is_complete() {
            "yes"
        } else {
            "no"
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            escape_cell(&outcome.name),
            outcome.game.len(),
            outcome.rejected.len(),
            outcome.score(),
            expected,
            result,
            complete
        );
    }

    let mismatches = outcomes
        .iter()
        .filter(|o| o.matched() == Some(false))
        .count();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} game{} replayed, {} mismatch{}.",
        outcomes.len(),
        if outcomes.len() == 1 { "" } else { "s" },
        mismatches,
        if mismatches == 1 { "" } else { "es" }
    );
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub fn write_summary_markdown(
    path: &Path,
    run_id: &str,
    outcomes: &[GameOutcome],
) -> Result<(), ReportError> {
    fs::write(path, render_summary_markdown(run_id, outcomes)).map_err(|source| {
        ReportError::Io {
            context: "writing summary markdown",
            source,
        }
    })
}
