//! Rotation orchestration: one-shot rotation, theme listing and the daemon loop.

use std::io::{self, Write};

use crate::config::Config;
use crate::deployer::{deploy_theme, DeployReport};
use crate::error::{DaemonError, RotationError};
use crate::scanner::{count_entries, discover_themes};
use crate::selector::Selector;
use crate::shutdown::{Shutdown, WaitOutcome};
use crate::theme::Theme;

/// Owns the configuration and the selection cursor for one process
#[derive(Debug)]
pub struct Rotator {
    config: Config,
    selector: Selector,
}

impl Rotator {
    pub fn new(config: Config) -> Self {
        let selector = Selector::new(config.mode);
        Self { config, selector }
    }

    /// Build a rotator with an explicit selector, e.g. to resume at a cursor
    pub fn with_selector(config: Config, selector: Selector) -> Self {
        Self { config, selector }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Discover themes under the configured themes directory
    pub fn find_themes(&self) -> Vec<Theme> {
        discover_themes(&self.config.themes_dir)
    }

    /// Discover, select and deploy one theme
    pub fn rotate_once(&mut self) -> Result<DeployReport, RotationError> {
        let themes = self.find_themes();
        let theme = self
            .selector
            .select(&themes)
            .ok_or(RotationError::NoThemes)?;

        deploy_theme(theme, &self.config).map_err(|source| RotationError::DeployFailed {
            theme: theme.name.clone(),
            source,
        })
    }

    /// Print discovered themes with a 1-based index and their entry count
    pub fn list_themes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let themes = self.find_themes();
        if themes.is_empty() {
            return writeln!(out, "No themes found");
        }

        writeln!(out, "Available themes:")?;
        for (i, theme) in themes.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} ({} files)",
                i + 1,
                theme.name,
                count_entries(&theme.path)
            )?;
        }
        Ok(())
    }

    /// Rotate, then wait `interval`, until a stop is requested.
    ///
    /// Failed rotations are logged and do not stop the loop. Returns the
    /// number of rotation cycles run. A stop that arrives mid-rotation is
    /// observed once the rotation finishes.
    pub fn run_daemon(&mut self, shutdown: &Shutdown) -> Result<u64, DaemonError> {
        tracing::info!("Starting daemon mode (interval: {}s)", self.config.interval);

        let mut cycles = 0u64;
        loop {
            match self.rotate_once() {
                Ok(_) => tracing::info!("Rotation successful"),
                Err(e) => tracing::error!("Rotation failed: {e}"),
            }
            cycles += 1;

            match shutdown.wait(self.config.interval()) {
                Ok(WaitOutcome::TimedOut) => continue,
                Ok(WaitOutcome::Stop) => {
                    tracing::info!("Daemon stopped by user");
                    return Ok(cycles);
                }
                Err(e) => {
                    tracing::error!("Daemon error: {e}");
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::SelectionMode;
    use std::fs;
    use std::path::Path;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn make_config(temp: &TempDir, mode: SelectionMode) -> Config {
        Config {
            themes_dir: temp.path().join("themes"),
            output_dir: temp.path().join("www"),
            interval: 0,
            mode,
            backup: false,
            backup_dir: temp.path().to_path_buf(),
        }
    }

    /// themes/light: index.html; themes/dark: index.html + style.css
    fn light_and_dark(temp: &TempDir) {
        let themes = temp.path().join("themes");
        write(&themes.join("light").join("index.html"), "light");
        write(&themes.join("dark").join("index.html"), "dark");
        write(&themes.join("dark").join("style.css"), "body{background:#000}");
    }

    fn output_names(config: &Config) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&config.output_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    // ==================== rotate_once tests ====================

    #[test]
    fn test_rotate_once_sequential_scenario() {
        let temp = TempDir::new().unwrap();
        light_and_dark(&temp);
        let config = make_config(&temp, SelectionMode::Sequential);
        write(&config.output_dir.join("index.html"), "old");
        write(&config.output_dir.join("legacy.js"), "old");
        let mut rotator = Rotator::new(config.clone());

        // Themes are visited in name order: dark, then light
        let first = rotator.rotate_once().unwrap();
        assert_eq!(first.theme, "dark");
        assert_eq!(first.items_copied, 2);
        assert_eq!(output_names(&config), vec!["index.html", "style.css"]);
        assert_eq!(
            fs::read_to_string(config.output_dir.join("index.html")).unwrap(),
            "dark"
        );

        let second = rotator.rotate_once().unwrap();
        assert_eq!(second.theme, "light");
        assert_eq!(second.items_copied, 1);
        assert_eq!(output_names(&config), vec!["index.html"]);
        assert_eq!(
            fs::read_to_string(config.output_dir.join("index.html")).unwrap(),
            "light"
        );

        assert_eq!(rotator.rotate_once().unwrap().theme, "dark");
    }

    #[test]
    fn test_rotate_once_resumes_from_cursor() {
        let temp = TempDir::new().unwrap();
        light_and_dark(&temp);
        let config = make_config(&temp, SelectionMode::Sequential);
        let mut rotator =
            Rotator::with_selector(config, Selector::with_cursor(SelectionMode::Sequential, 1));

        assert_eq!(rotator.rotate_once().unwrap().theme, "light");
        assert_eq!(rotator.selector().cursor(), 0);
    }

    #[test]
    fn test_rotate_once_random_deploys_a_theme() {
        let temp = TempDir::new().unwrap();
        light_and_dark(&temp);
        let config = make_config(&temp, SelectionMode::Random);
        let mut rotator = Rotator::new(config.clone());

        let report = rotator.rotate_once().unwrap();

        assert!(report.theme == "light" || report.theme == "dark");
        assert!(config.output_dir.join("index.html").exists());
    }

    #[test]
    fn test_rotate_once_no_themes() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp, SelectionMode::Sequential);
        let mut rotator = Rotator::new(config.clone());

        let result = rotator.rotate_once();

        assert!(matches!(result, Err(RotationError::NoThemes)));
        assert!(!config.output_dir.exists());
        assert_eq!(rotator.selector().cursor(), 0);
    }

    #[test]
    fn test_rotate_once_only_empty_themes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("themes").join("blank")).unwrap();
        let mut rotator = Rotator::new(make_config(&temp, SelectionMode::Random));

        assert!(matches!(rotator.rotate_once(), Err(RotationError::NoThemes)));
    }

    #[test]
    fn test_rotate_once_deploy_failure() {
        let temp = TempDir::new().unwrap();
        light_and_dark(&temp);
        let config = make_config(&temp, SelectionMode::Sequential);
        // output path occupied by a regular file
        fs::write(&config.output_dir, "blocker").unwrap();
        let mut rotator = Rotator::new(config);

        let result = rotator.rotate_once();

        assert!(matches!(
            result,
            Err(RotationError::DeployFailed { ref theme, .. }) if theme == "dark"
        ));
    }

    // ==================== list_themes tests ====================

    #[test]
    fn test_list_themes_output() {
        let temp = TempDir::new().unwrap();
        light_and_dark(&temp);
        let rotator = Rotator::new(make_config(&temp, SelectionMode::Random));
        let mut out = Vec::new();

        rotator.list_themes(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Available themes:\n  1. dark (2 files)\n  2. light (1 files)\n"
        );
    }

    #[test]
    fn test_list_themes_missing_dir_no_mutation() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp, SelectionMode::Random);
        let rotator = Rotator::new(config.clone());
        let mut out = Vec::new();

        rotator.list_themes(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "No themes found\n");
        assert!(!config.themes_dir.exists());
        assert!(!config.output_dir.exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_list_themes_empty_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("themes").join("empty")).unwrap();
        let rotator = Rotator::new(make_config(&temp, SelectionMode::Random));
        let mut out = Vec::new();

        rotator.list_themes(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "No themes found\n");
    }

    // ==================== run_daemon tests ====================

    #[test]
    fn test_run_daemon_stops_on_request() {
        let temp = TempDir::new().unwrap();
        light_and_dark(&temp);
        let config = Config {
            interval: 3600,
            ..make_config(&temp, SelectionMode::Sequential)
        };
        let mut rotator = Rotator::new(config.clone());
        let (tx, shutdown) = Shutdown::channel();
        tx.send(()).unwrap();

        let cycles = rotator.run_daemon(&shutdown).unwrap();

        assert_eq!(cycles, 1);
        assert_eq!(output_names(&config), vec!["index.html", "style.css"]);
    }

    #[test]
    fn test_run_daemon_keeps_going_after_failures() {
        let temp = TempDir::new().unwrap();
        // No themes: every rotation fails, the loop continues
        let mut rotator = Rotator::new(Config {
            interval: 0,
            ..make_config(&temp, SelectionMode::Random)
        });
        let (tx, shutdown) = Shutdown::channel();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            tx.send(()).unwrap();
            // hold the sender until the daemon has seen the stop
            thread::sleep(Duration::from_millis(200));
        });

        let cycles = rotator.run_daemon(&shutdown).unwrap();

        assert!(cycles >= 1);
        handle.join().unwrap();
    }

    #[test]
    fn test_run_daemon_fatal_when_channel_closed() {
        let temp = TempDir::new().unwrap();
        light_and_dark(&temp);
        let mut rotator = Rotator::new(make_config(&temp, SelectionMode::Sequential));
        let (tx, shutdown) = Shutdown::channel();
        drop(tx);

        let result = rotator.run_daemon(&shutdown);

        assert!(matches!(result, Err(DaemonError::ShutdownChannelClosed)));
    }
}
