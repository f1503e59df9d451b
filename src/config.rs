//! CLI arguments and the JSON settings file.

use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::theme::SelectionMode;

/// Default settings file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "rotator.log";

/// Rotate static site themes into a web server document root
#[derive(Parser, Debug)]
#[command(name = "theme-rotator")]
#[command(version)]
#[command(about = "Rotate static site themes into a web server document root")]
pub struct Cli {
    /// Run a single rotation and exit
    #[arg(long)]
    pub once: bool,

    /// Run rotations forever on the configured interval
    #[arg(long)]
    pub daemon: bool,

    /// List available themes and exit
    #[arg(long)]
    pub list: bool,

    /// Settings file path
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    List,
    Once,
    Daemon,
    Usage,
}

impl Cli {
    /// Resolve the mode flags. `--list` wins over `--once`, which wins over `--daemon`.
    pub fn run_mode(&self) -> RunMode {
        if self.list {
            RunMode::List
        } else if self.once {
            RunMode::Once
        } else if self.daemon {
            RunMode::Daemon
        } else {
            RunMode::Usage
        }
    }
}

/// Operator settings loaded from the JSON settings file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one subdirectory per theme
    pub themes_dir: PathBuf,
    /// Web server document root that gets replaced
    pub output_dir: PathBuf,
    /// Seconds to wait between daemon rotations
    pub interval: u64,
    /// Theme selection mode
    pub mode: SelectionMode,
    /// Snapshot the output directory before each deployment
    pub backup: bool,
    /// Where `backup_<timestamp>` directories are created
    pub backup_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            themes_dir: PathBuf::from("themes"),
            output_dir: PathBuf::from("/var/www/html"),
            interval: 3600,
            mode: SelectionMode::Random,
            backup: true,
            backup_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load settings, falling back to defaults on any error.
    ///
    /// A missing file, unreadable file, malformed JSON or a value of the
    /// wrong type for a known key all produce `Config::default()`.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default configuration: {e}");
                Self::default()
            }
        }
    }

    /// Load settings, reporting why they could not be read
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from JSON text; absent keys keep their defaults
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Daemon interval as a Duration
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}
