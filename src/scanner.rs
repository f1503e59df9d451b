use std::fs;
use std::path::Path;

use crate::copier::list_entries;
use crate::error::DeployError;
use crate::theme::Theme;

/// True when `dir` has at least one entry. Only the first level is checked.
fn has_entries(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut rd| rd.next().is_some())
        .unwrap_or(false)
}

/// Number of immediate entries inside a theme directory
pub fn count_entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
}

/// Scan `themes_dir` for non-empty subdirectories, sorted by name
pub fn scan_themes(themes_dir: &Path) -> Result<Vec<Theme>, DeployError> {
    if !themes_dir.exists() {
        return Err(DeployError::ThemesDirNotFound {
            path: themes_dir.to_path_buf(),
        });
    }

    let themes = list_entries(themes_dir)?
        .into_iter()
        .filter(|path| path.is_dir() && has_entries(path))
        .map(Theme::from_path)
        .collect();

    Ok(themes)
}

/// Discover deployable themes, logging the outcome.
///
/// A missing or unreadable themes directory is reported at error level and
/// yields an empty list; an empty result is reported at warning level.
pub fn discover_themes(themes_dir: &Path) -> Vec<Theme> {
    let themes = match scan_themes(themes_dir) {
        Ok(themes) => themes,
        Err(e) => {
            tracing::error!("{e}");
            return Vec::new();
        }
    };

    if themes.is_empty() {
        tracing::warn!("No theme directories found in {}", themes_dir.display());
    } else {
        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        tracing::info!("Found {} themes: {:?}", themes.len(), names);
    }

    themes
}
