//! Theme deployment into the output directory.
//!
//! Deployment is not atomic: a failure while clearing or copying leaves the
//! output directory partially cleared or partially populated.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::backup::create_backup;
use crate::config::Config;
use crate::copier::{clear_directory, copy_directory, copy_file, list_entries};
use crate::error::DeployError;
use crate::theme::Theme;

/// Outcome of a successful deployment
#[derive(Debug, Clone)]
pub struct DeployReport {
    /// Name of the deployed theme
    pub theme: String,
    /// Top-level entries copied into the output directory
    pub items_copied: usize,
    /// Files copied at any depth
    pub files_copied: u64,
    /// Bytes copied
    pub bytes_copied: u64,
    /// Backup taken before deployment, if any
    pub backup: Option<PathBuf>,
    /// Time taken for this deployment
    pub duration: Duration,
}

/// Run the configured backup. Failures are logged and swallowed.
fn backup_output(config: &Config) -> Option<PathBuf> {
    if !config.backup {
        return None;
    }

    match create_backup(&config.output_dir, &config.backup_dir) {
        Ok(Some(path)) => {
            tracing::info!("Backup created: {}", path.display());
            Some(path)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Backup failed: {e}");
            None
        }
    }
}

/// Empty the output directory, or create it if missing
pub fn prepare_output(output_dir: &Path) -> Result<(), DeployError> {
    if output_dir.exists() {
        let removed = clear_directory(output_dir)?;
        tracing::debug!("Cleared {removed} entries from {}", output_dir.display());
    } else {
        fs::create_dir_all(output_dir).map_err(|source| DeployError::CreateDirFailed {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Copy every top-level entry of `theme_dir` into `output_dir`.
/// Returns (items, files, bytes).
pub fn copy_theme_contents(
    theme_dir: &Path,
    output_dir: &Path,
) -> Result<(usize, u64, u64), DeployError> {
    let mut items = 0usize;
    let mut files = 0u64;
    let mut bytes = 0u64;

    for src in list_entries(theme_dir)? {
        let Some(name) = src.file_name() else {
            continue;
        };
        let dst = output_dir.join(name);

        if src.is_file() {
            bytes += copy_file(&src, &dst)?;
            files += 1;
            items += 1;
        } else if src.is_dir() {
            let (f, b) = copy_directory(&src, &dst)?;
            files += f;
            bytes += b;
            items += 1;
        }
    }

    Ok((items, files, bytes))
}

fn deploy_inner(theme: &Theme, output_dir: &Path) -> Result<(usize, u64, u64), DeployError> {
    prepare_output(output_dir)?;
    copy_theme_contents(&theme.path, output_dir)
}

/// Replace the output directory's contents with the theme's contents.
///
/// Order: backup, clear (or create) output, copy. Backup failures only warn;
/// clear and copy failures abort the deployment and are logged at error level.
pub fn deploy_theme(theme: &Theme, config: &Config) -> Result<DeployReport, DeployError> {
    let start = Instant::now();

    let backup = backup_output(config);

    match deploy_inner(theme, &config.output_dir) {
        Ok((items_copied, files_copied, bytes_copied)) => {
            tracing::info!("Deployed theme '{}' - {} items copied", theme.name, items_copied);
            Ok(DeployReport {
                theme: theme.name.clone(),
                items_copied,
                files_copied,
                bytes_copied,
                backup,
                duration: start.elapsed(),
            })
        }
        Err(e) => {
            tracing::error!("Deployment failed: {e}");
            Err(e)
        }
    }
}
