use std::path::PathBuf;

use clap::Parser;

use bowling_bench::config::{ReplayConfig, ResolvedOutputs};
use bowling_bench::logging::init_logging;
use bowling_bench::replay::ReplayRunner;

/// Replay harness for scripted bowling games.
#[derive(Debug, Parser)]
#[command(
    name = "bowling-bench",
    author,
    version,
    about = "Deterministic ten-pin scoring replay harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Exit after validating the configuration (no games are replayed).
    #[arg(long)]
    validate_only: bool,

    /// Exit with an error when any game's score differs from its expected score.
    #[arg(long)]
    fail_on_mismatch: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let game_count = config.games.len();
    let run_id = config.run_id.clone();

    println!(
        "Loaded configuration '{run_id}' with {game_count} game{}",
        if game_count == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = ReplayRunner::new(config, outputs);
    let summary = runner.run()?;

    println!(
        "Replay complete for '{run_id}': {} games, {} rejected rolls, {} mismatches → {}",
        summary.games_played,
        summary.rolls_rejected,
        summary.mismatches,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    if cli.fail_on_mismatch && summary.mismatches > 0 {
        anyhow::bail!(
            "{} game(s) scored differently than expected; see {}",
            summary.mismatches,
            summary.summary_path.display()
        );
    }

    Ok(())
}
