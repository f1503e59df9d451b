use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::DeployError;

/// ENOSPC on Unix
const ENOSPC: i32 = 28;

#[inline]
fn is_disk_full(e: &io::Error) -> bool {
    e.raw_os_error() == Some(ENOSPC)
}

fn create_dir_error(path: &Path, e: io::Error) -> DeployError {
    if is_disk_full(&e) {
        return DeployError::DiskFull {
            path: path.to_path_buf(),
        };
    }
    DeployError::CreateDirFailed {
        path: path.to_path_buf(),
        source: e,
    }
}

/// Copy access and modification times from `src` onto `dst`.
/// Not every platform lets a read-only handle change timestamps.
fn preserve_times(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let times = FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    File::open(dst)?.set_times(times)
}

/// Copy a single file from src to dst, keeping permissions and timestamps
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, DeployError> {
    // Create parent directory if needed
    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| create_dir_error(parent, e))?;
        }
    }

    // fs::copy carries permission bits over
    let bytes = fs::copy(src, dst).map_err(|e| {
        if is_disk_full(&e) {
            return DeployError::DiskFull {
                path: dst.to_path_buf(),
            };
        }
        DeployError::CopyFailed {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source: e,
        }
    })?;

    if let Err(e) = preserve_times(src, dst) {
        tracing::debug!("Could not preserve timestamps on {}: {e}", dst.display());
    }

    Ok(bytes)
}

/// Copy a directory tree. `dst` must not exist yet; it is created
/// with `create_dir`, so an existing destination is an error.
/// Returns (files_copied, bytes_copied).
pub fn copy_directory(src: &Path, dst: &Path) -> Result<(u64, u64), DeployError> {
    let mut files_copied = 0u64;
    let mut bytes_copied = 0u64;
    let mut dirs: Vec<(PathBuf, PathBuf)> = Vec::new();

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|source| DeployError::WalkFailed {
            path: src.to_path_buf(),
            source,
        })?;

        let src_path = entry.path();
        let relative = src_path.strip_prefix(src).unwrap_or(src_path);
        let dst_path = if relative.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(relative)
        };

        if entry.file_type().is_dir() {
            fs::create_dir(&dst_path).map_err(|e| create_dir_error(&dst_path, e))?;
            dirs.push((src_path.to_path_buf(), dst_path));
        } else if entry.file_type().is_file() {
            bytes_copied += copy_file(src_path, &dst_path)?;
            files_copied += 1;
        }
    }

    // Directory metadata last, deepest first, so copying children does not
    // bump parent mtimes or trip over read-only parents.
    for (src_dir, dst_dir) in dirs.iter().rev() {
        if let Ok(meta) = fs::metadata(src_dir) {
            if let Err(e) = fs::set_permissions(dst_dir, meta.permissions()) {
                tracing::debug!("Could not copy permissions to {}: {e}", dst_dir.display());
            }
        }
        if let Err(e) = preserve_times(src_dir, dst_dir) {
            tracing::debug!("Could not preserve timestamps on {}: {e}", dst_dir.display());
        }
    }

    Ok((files_copied, bytes_copied))
}

/// Remove every immediate entry of `dir` but keep `dir` itself.
/// Symlinks are unlinked, never followed. Returns the number of entries removed.
pub fn clear_directory(dir: &Path) -> Result<usize, DeployError> {
    let entries = fs::read_dir(dir).map_err(|source| DeployError::ReadDirFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut removed = 0usize;
    for entry in entries {
        let entry = entry.map_err(|source| DeployError::ReadDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| DeployError::RemoveFailed {
            path: path.clone(),
            source,
        })?;

        let result = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|source| DeployError::RemoveFailed {
            path: path.clone(),
            source,
        })?;
        removed += 1;
    }

    Ok(removed)
}

/// List the immediate entries of `dir`, sorted by file name
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, DeployError> {
    let mut entries = fs::read_dir(dir)
        .and_then(|rd| rd.map(|e| e.map(|e| e.path())).collect::<io::Result<Vec<_>>>())
        .map_err(|source| DeployError::ReadDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    entries.sort();
    Ok(entries)
}
