use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use grid_core::{load_settings, GridConfig};
use shared::domain::GridPreset;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::GridApp;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start from a named preset. Skips the settings file and the
    /// APP__GRID_* environment.
    #[arg(long, conflicts_with = "config")]
    preset: Option<GridPreset>,
    #[arg(long)]
    seed: Option<u64>,
}

fn startup_config(args: &Args) -> anyhow::Result<GridConfig> {
    let mut config = match args.preset {
        Some(preset) => GridConfig::preset(preset),
        None => load_settings(args.config.as_deref())?,
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let config = startup_config(&args)?;

    let (window_w, window_h) = window_size(&config);
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let _worker = backend_bridge::runtime::launch(config, cmd_rx, ui_tx)
        .context("failed to spawn grid worker")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Color Chaos Grid")
            .with_inner_size([window_w, window_h])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Color Chaos Grid",
        options,
        Box::new(|_cc| Ok(Box::new(GridApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}

fn window_size(config: &GridConfig) -> (f32, f32) {
    let columns = config.columns.max(1);
    let rows = config.size.div_ceil(columns);
    let width = (columns as f32 * 72.0 + 64.0).max(480.0);
    let height = rows as f32 * 72.0 + 320.0;
    (width, height)
}
