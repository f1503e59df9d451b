use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use theme_rotator::config::{Cli, Config, RunMode};
use theme_rotator::logging;
use theme_rotator::rotator::Rotator;
use theme_rotator::shutdown::Shutdown;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mode = cli.run_mode();

    if mode == RunMode::Usage {
        Cli::command()
            .print_help()
            .context("Failed to print usage")?;
        return Ok(ExitCode::SUCCESS);
    }

    logging::init(&cli.log_file, cli.verbose)?;

    let config = Config::load(&cli.config);
    tracing::debug!(
        themes_dir = %config.themes_dir.display(),
        output_dir = %config.output_dir.display(),
        interval = config.interval,
        mode = %config.mode,
        backup = config.backup,
        "Configuration loaded"
    );

    let mut rotator = Rotator::new(config);

    match mode {
        RunMode::List => {
            rotator
                .list_themes(&mut io::stdout().lock())
                .context("Failed to write theme list")?;
            Ok(ExitCode::SUCCESS)
        }
        RunMode::Once => match rotator.rotate_once() {
            Ok(_) => {
                println!("Rotation completed successfully");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                tracing::debug!("{e}");
                println!("Rotation failed");
                Ok(ExitCode::from(1))
            }
        },
        RunMode::Daemon => {
            let shutdown = Shutdown::install().context("Failed to set signal handler")?;
            match rotator.run_daemon(&shutdown) {
                Ok(_) => Ok(ExitCode::SUCCESS),
                // already logged by the daemon loop
                Err(_) => Ok(ExitCode::from(2)),
            }
        }
        RunMode::Usage => Ok(ExitCode::SUCCESS),
    }
}
