//! CLI command implementations for Delve.

pub(crate) mod play;
pub(crate) mod run;
pub(crate) mod survey;

mod output;
mod prompt;

use clap::{Args, ValueEnum};
use delve::game::{GameConfig, LevelGenError, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use std::error::Error;
use std::fmt;

/// Grid and seed options shared by every command.
#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct GameOptions {
    /// Random seed (default: random)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub(crate) width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub(crate) height: u16,
}

impl GameOptions {
    /// The given seed, or a fresh random one.
    pub(crate) fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Game configuration with default player stats.
    pub(crate) fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            ..GameConfig::default()
        }
    }
}

/// Output format for the `survey` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SurveyFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format, one row per session.
    Csv,
    /// JSON lines, one object per session.
    Jsonl,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) enum CliError {
    /// Terminal or stream failure.
    Io(std::io::Error),
    /// The requested grid cannot hold a level.
    Level(LevelGenError),
    /// Report serialization failed.
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Level(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "JSON serialization failed: {e}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Level(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<LevelGenError> for CliError {
    fn from(e: LevelGenError) -> Self {
        Self::Level(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
