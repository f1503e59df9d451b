//! Theme and selection mode types.
//!
//! A theme is a non-empty directory directly under the themes directory.
//! Its identity is the directory name; nothing else about it is inspected.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A deployable theme directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Directory name, used as the theme identity
    pub name: String,
    /// Full path to the theme directory
    pub path: PathBuf,
}

impl Theme {
    /// Build a Theme from its directory path, naming it after the last component
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// How the next theme is picked on each rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Uniform choice over the current theme set, no memory between calls
    #[default]
    Random,
    /// Round-robin over the theme set using a cursor
    Sequential,
}

impl SelectionMode {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Random => "random",
            SelectionMode::Sequential => "sequential",
        }
    }

    #[inline]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "random" => Some(SelectionMode::Random),
            "sequential" => Some(SelectionMode::Sequential),
            _ => None,
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
