use std::{fmt::Write as _, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use grid_core::{load_settings, GridConfig, GridController};
use shared::{
    domain::GridPreset,
    error::ErrorReport,
    protocol::{GridCommand, GridSnapshot},
};
use tracing_subscriber::EnvFilter;

/// Applies a command script to a fresh grid and prints the result.
#[derive(Parser, Debug)]
struct Args {
    /// TOML settings file; defaults to ./grid.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start from a named preset. Skips the settings file and the
    /// APP__GRID_* environment.
    #[arg(long, conflicts_with = "config")]
    preset: Option<GridPreset>,
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final snapshot as JSON.
    #[arg(long)]
    json: bool,
    /// click:<i>, doubleClick:<i>, randomize, reset
    commands: Vec<String>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = match args.preset {
        Some(preset) => GridConfig::preset(preset),
        None => load_settings(args.config.as_deref())?,
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut grid = GridController::from_config(config).context("failed to build grid")?;
    let failures = run_script(&mut grid, &args.commands);
    for report in &failures {
        eprintln!("error: {:?}: {}", report.code, report.message);
    }

    let snapshot = grid.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_text(&snapshot));
    }

    Ok(if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Parses and applies each token in order. Bad tokens and rejected commands
/// are reported and skipped; the rest of the script still runs.
fn run_script(grid: &mut GridController, tokens: &[String]) -> Vec<ErrorReport> {
    let mut failures = Vec::new();
    for token in tokens {
        let outcome = match token.parse::<GridCommand>() {
            Ok(command) => grid
                .apply(command)
                .map(|_| ())
                .map_err(|err| ErrorReport::from(&err)),
            Err(err) => Err(ErrorReport::from(&err)),
        };
        if let Err(report) = outcome {
            failures.push(report);
        }
    }
    failures
}

fn render_text(snapshot: &GridSnapshot) -> String {
    let width = snapshot
        .cells
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in snapshot.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|c| format!("{:<width$}", c.name()))
            .collect();
        let _ = writeln!(out, "{}", line.join(" ").trim_end());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Checksum: {}", snapshot.checksum);
    let _ = writeln!(out, "Session: {}", snapshot.session);
    let _ = writeln!(out, "Actions: {}", snapshot.action_count);
    let last = snapshot
        .last_action
        .map(|a| a.to_string())
        .unwrap_or_else(|| "none".to_string());
    let _ = writeln!(out, "Last action: {last}");
    out
}
