use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors. Always recovered by falling back to defaults.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Filesystem errors raised while scanning, clearing or copying directories
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Themes directory not found: {path}")]
    ThemesDirNotFound { path: PathBuf },

    #[error("No space left on device for {path}")]
    DiskFull { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    WalkFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to copy {src} to {dst}: {source}")]
    CopyFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backup errors. Logged as warnings, never block a deployment.
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Backup destination already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to back up into {path}: {source}")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: DeployError,
    },
}

/// Why a single rotation cycle did not deploy anything
#[derive(Error, Debug)]
pub enum RotationError {
    #[error("No themes available")]
    NoThemes,

    #[error("Deployment of theme '{theme}' failed: {source}")]
    DeployFailed {
        theme: String,
        #[source]
        source: DeployError,
    },
}

/// Unrecoverable daemon errors; these end the daemon loop
#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("Failed to install signal handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    #[error("Shutdown channel disconnected")]
    ShutdownChannelClosed,
}
