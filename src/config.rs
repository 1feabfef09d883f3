//! Command-line configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;

#[derive(Parser, Debug)]
#[command(name = "mystic_quest")]
#[command(about = "Mystic Quest Remastered: a terminal arcade shooter")]
pub struct Args {
    /// Frame-rate cap (ticks per second)
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for enemy spawn positions (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    FpsOutOfRange { fps: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FpsOutOfRange { fps, max } => {
                write!(f, "fps out of range: {fps} (allowed 1..={max})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated runtime settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub fps: u32,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Time budget for one frame at the configured rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

impl Args {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::FpsOutOfRange {
                fps: self.fps,
                max: MAX_FPS,
            });
        }
        Ok(Config {
            fps: self.fps,
            seed: self.seed,
            log_file: self.log_file,
        })
    }
}
