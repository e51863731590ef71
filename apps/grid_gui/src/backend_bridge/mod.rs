//! Bridge between the UI thread and the worker that owns the grid.

pub mod commands;
pub mod runtime;
