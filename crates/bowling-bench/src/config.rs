use bowling_core::game::bowling_game::Game;
use bowling_core::model::pins::InvalidRollError;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayConfig {
    pub run_id: String,
    pub games: Vec<GameConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReplayConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ReplayConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        validate_games(&self.games)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// A scripted game: rolls in lane order plus an optional expected score.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    pub name: String,
    pub rolls: Vec<RollEntry>,
    #[serde(default)]
    pub expected_score: Option<u32>,
}

/// A roll as written in the fixture. Fractional numbers are kept so the core
/// can reject them instead of the YAML parser.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RollEntry {
    Whole(i64),
    Fractional(f64),
}

impl RollEntry {
    pub fn record(self, game: &mut Game) -> Result<(), InvalidRollError> {
        match self {
            RollEntry::Whole(pins) => game.try_roll(pins),
            RollEntry::Fractional(pins) => game.try_roll(pins),
        }
    }
}

impl fmt::Display for RollEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollEntry::Whole(pins) => write!(f, "{pins}"),
            RollEntry::Fractional(pins) => write!(f, "{pins}"),
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_games(games: &[GameConfig]) -> Result<(), ValidationError> {
    if games.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "games".to_string(),
            message: "at least one game must be specified".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for game in games {
        if game.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "games.name".to_string(),
                message: "game name must not be empty".to_string(),
            });
        }

        if !seen.insert(game.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "games".to_string(),
                message: format!("game name '{}' defined more than once", game.name),
            });
        }

        if let Some(expected) = game.expected_score {
            if expected > 300 {
                return Err(ValidationError::InvalidField {
                    field: format!("games[{}].expected_score", game.name),
                    message: "expected score cannot exceed 300".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "league_night"
games:
  - name: "gutter"
    rolls: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    expected_score: 0
  - name: "perfect"
    rolls: [10, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10]
    expected_score: 300
  - name: "sloppy"
    rolls: [3, 2.5, -1, 4]
outputs:
  jsonl: "bench/out/{run_id}/games.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: ReplayConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.games.len(), 3);
        assert!(cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/league_night/games.jsonl")
        );
        assert_eq!(
            outputs.summary_md,
            PathBuf::from("bench/out/league_night/summary.md")
        );
    }

    #[test]
    fn rolls_keep_fractional_and_negative_values() {
        let cfg: ReplayConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        let sloppy = &cfg.games[2];
        assert_eq!(
            sloppy.rolls,
            vec![
                RollEntry::Whole(3),
                RollEntry::Fractional(2.5),
                RollEntry::Whole(-1),
                RollEntry::Whole(4),
            ]
        );
        assert_eq!(sloppy.expected_score, None);
    }

    #[test]
    fn roll_entries_record_through_the_game() {
        let mut game = Game::new();
        assert!(RollEntry::Whole(7).record(&mut game).is_ok());
        assert!(RollEntry::Fractional(3.0).record(&mut game).is_ok());
        assert_eq!(
            RollEntry::Fractional(2.5).record(&mut game),
            Err(InvalidRollError::NotInteger(2.5))
        );
        assert_eq!(
            RollEntry::Whole(11).record(&mut game),
            Err(InvalidRollError::OutOfRange(11))
        );
        assert_eq!(
            RollEntry::Fractional(1e30).record(&mut game),
            Err(InvalidRollError::FloatOutOfRange(1e30))
        );
        assert_eq!(game.len(), 2);
    }

    #[test]
    fn logging_defaults_when_block_missing() {
        let yaml = r#"
run_id: "quiet"
games:
  - name: "one"
    rolls: [1, 1]
outputs:
  jsonl: "out.jsonl"
  summary_md: "out.md"
"#;
        let mut cfg: ReplayConfig = serde_yaml::from_str(yaml).expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn rejects_invalid_run_id() {
        let mut cfg: ReplayConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.run_id = "invalid id".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn rejects_duplicate_game_names() {
        let mut cfg: ReplayConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.games[1].name = "gutter".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("defined more than once"));
    }

    #[test]
    fn rejects_empty_game_list() {
        let mut cfg: ReplayConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.games.clear();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().starts_with("games:"));
    }

    #[test]
    fn rejects_impossible_expected_score() {
        let mut cfg: ReplayConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.games[0].expected_score = Some(301);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ReplayConfig::from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), Path::new("does/not/exist.yaml"));
    }
}
