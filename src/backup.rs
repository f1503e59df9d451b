//! Timestamped snapshots of the output directory.
//!
//! Backups are never pruned. Two backups in the same second collide on
//! the directory name; the second one fails rather than merging.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::copier::copy_directory;
use crate::error::BackupError;

/// Seconds since the Unix epoch, 0 if the clock is before it
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Backup directory name for a given timestamp
pub fn backup_name(timestamp: u64) -> String {
    format!("backup_{timestamp}")
}

/// Copy `output_dir` into `backup_root/backup_<timestamp>`.
///
/// Returns `Ok(None)` when there is nothing to back up.
pub fn create_backup_at(
    output_dir: &Path,
    backup_root: &Path,
    timestamp: u64,
) -> Result<Option<PathBuf>, BackupError> {
    if !output_dir.exists() {
        return Ok(None);
    }

    let dest = backup_root.join(backup_name(timestamp));
    if dest.exists() {
        return Err(BackupError::AlreadyExists { path: dest });
    }

    copy_directory(output_dir, &dest).map_err(|source| BackupError::CopyFailed {
        path: dest.clone(),
        source,
    })?;

    Ok(Some(dest))
}

/// Back up `output_dir` using the current time
pub fn create_backup(output_dir: &Path, backup_root: &Path) -> Result<Option<PathBuf>, BackupError> {
    create_backup_at(output_dir, backup_root, unix_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_output(root: &Path) -> PathBuf {
        let output = root.join("www");
        fs::create_dir_all(output.join("css")).unwrap();
        fs::write(output.join("index.html"), "live").unwrap();
        fs::write(output.join("css").join("site.css"), "body{}").unwrap();
        output
    }

    #[test]
    fn test_backup_name_format() {
        assert_eq!(backup_name(1_700_000_000), "backup_1700000000");
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        // 2020-01-01
        assert!(unix_timestamp() > 1_577_836_800);
    }

    #[test]
    fn test_create_backup_copies_tree() {
        let temp = TempDir::new().unwrap();
        let output = make_output(temp.path());
        let backups = temp.path().join("backups");
        fs::create_dir_all(&backups).unwrap();

        let dest = create_backup_at(&output, &backups, 42).unwrap().unwrap();

        assert_eq!(dest, backups.join("backup_42"));
        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "live");
        assert_eq!(
            fs::read_to_string(dest.join("css").join("site.css")).unwrap(),
            "body{}"
        );
        // source untouched
        assert!(output.join("index.html").exists());
    }

    #[test]
    fn test_create_backup_missing_output_is_noop() {
        let temp = TempDir::new().unwrap();

        let result = create_backup_at(&temp.path().join("missing"), temp.path(), 1).unwrap();

        assert!(result.is_none());
        assert!(!temp.path().join("backup_1").exists());
    }

    #[test]
    fn test_create_backup_same_second_collides() {
        let temp = TempDir::new().unwrap();
        let output = make_output(temp.path());

        create_backup_at(&output, temp.path(), 7).unwrap();
        let second = create_backup_at(&output, temp.path(), 7);

        assert!(matches!(second, Err(BackupError::AlreadyExists { .. })));
    }

    #[test]
    fn test_create_backup_unwritable_root_fails() {
        let temp = TempDir::new().unwrap();
        let output = make_output(temp.path());
        // A regular file cannot hold backup directories
        let root = temp.path().join("not_a_dir");
        fs::write(&root, "").unwrap();

        let result = create_backup_at(&output, &root, 3);

        assert!(matches!(result, Err(BackupError::CopyFailed { .. })));
    }
}
