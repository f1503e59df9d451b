//! # Theme Rotator
//!
//! Periodically replaces a web server's document root with the contents of
//! one of several theme directories, optionally backing up the previous
//! contents first.
//!
//! ## Features
//!
//! - Theme discovery (non-empty subdirectories of the themes directory)
//! - Random or sequential (round-robin) selection
//! - Timestamped backups of the output directory
//! - Metadata-preserving recursive copy
//! - Daemon mode with an interruptible wait between rotations
//!
//! ## Usage
//!
//! ```ignore
//! use theme_rotator::config::Config;
//! use theme_rotator::rotator::Rotator;
//!
//! let mut rotator = Rotator::new(Config::load("config.json".as_ref()));
//! rotator.rotate_once()?;
//! ```

/// Timestamped snapshots of the output directory
pub mod backup;

/// CLI arguments and the JSON settings file
pub mod config;

/// File copying and directory clearing
pub mod copier;

/// Theme deployment into the output directory
pub mod deployer;

/// Error types for configuration, deployment, backup and the daemon
pub mod error;

/// Console and file logging
pub mod logging;

/// One-shot rotation, listing and the daemon loop
pub mod rotator;

/// Theme discovery
pub mod scanner;

/// Random and sequential theme selection
pub mod selector;

/// Interruptible waiting for daemon shutdown
pub mod shutdown;

/// Theme and selection mode types
pub mod theme;
