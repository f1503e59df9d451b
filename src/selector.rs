//! Theme selection.
//!
//! The sequential cursor lives on the `Selector` rather than in global state.
//! It is not renormalized when the theme set changes size between calls, so
//! adding or removing themes can make the rotation skip or repeat entries.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::theme::{SelectionMode, Theme};

/// Picks the next theme to deploy
#[derive(Debug, Clone)]
pub struct Selector {
    mode: SelectionMode,
    cursor: usize,
}

impl Selector {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode, cursor: 0 }
    }

    /// Start a sequential rotation at a given cursor
    pub fn with_cursor(mode: SelectionMode, cursor: usize) -> Self {
        Self { mode, cursor }
    }

    #[inline]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pick a theme using the thread-local RNG for random mode.
    /// Returns None for an empty theme set.
    pub fn select<'a>(&mut self, themes: &'a [Theme]) -> Option<&'a Theme> {
        self.select_with(themes, &mut rand::thread_rng())
    }

    /// Pick a theme with a caller-supplied RNG
    pub fn select_with<'a, R: Rng + ?Sized>(
        &mut self,
        themes: &'a [Theme],
        rng: &mut R,
    ) -> Option<&'a Theme> {
        if themes.is_empty() {
            return None;
        }

        match self.mode {
            SelectionMode::Random => themes.choose(rng),
            SelectionMode::Sequential => {
                let len = themes.len();
                let selected = &themes[self.cursor % len];
                self.cursor = (self.cursor + 1) % len;
                Some(selected)
            }
        }
    }
}
