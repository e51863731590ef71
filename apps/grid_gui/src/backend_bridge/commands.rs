//! Commands queued from the UI to the grid worker.

use shared::protocol::GridCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    Grid(GridCommand),
    /// Re-send the current snapshot without changing state.
    Refresh,
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Grid(GridCommand::Click { .. }) => "click",
            BackendCommand::Grid(GridCommand::DoubleClick { .. }) => "double_click",
            BackendCommand::Grid(GridCommand::Randomize) => "randomize",
            BackendCommand::Grid(GridCommand::Reset) => "reset",
            BackendCommand::Refresh => "refresh",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
