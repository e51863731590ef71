//! Worker thread that owns the grid controller. All commands are serialized
//! through its queue, so the controller never needs a lock.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use grid_core::{GridConfig, GridController};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub fn launch(
    config: GridConfig,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("grid-worker".to_string())
        .spawn(move || run_worker(config, cmd_rx, ui_tx))
}

fn run_worker(config: GridConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let mut grid = match GridController::from_config(config) {
        Ok(grid) => grid,
        Err(err) => {
            tracing::error!(%err, code = ?err.code(), "grid worker startup failure");
            let _ = ui_tx.send(UiEvent::Error(UiError::from_config_error(&err)));
            return;
        }
    };

    if ui_tx
        .send(UiEvent::Snapshot(Box::new(grid.snapshot())))
        .is_err()
    {
        return;
    }

    while let Ok(cmd) = cmd_rx.recv() {
        let event = match cmd {
            BackendCommand::Grid(command) => match grid.apply(command).map(|_| ()) {
                Ok(()) => UiEvent::Snapshot(Box::new(grid.snapshot())),
                Err(err) => {
                    tracing::warn!(%err, ?command, "grid command rejected");
                    UiEvent::Error(UiError::from_grid_error(&err))
                }
            },
            BackendCommand::Refresh => UiEvent::Snapshot(Box::new(grid.snapshot())),
            BackendCommand::Shutdown => break,
        };

        if ui_tx.send(event).is_err() {
            tracing::debug!("ui receiver dropped; stopping grid worker");
            break;
        }
    }

    tracing::info!(session = %grid.session(), "grid worker stopped");
}
