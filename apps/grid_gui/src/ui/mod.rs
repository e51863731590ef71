//! UI layer for the grid GUI.

pub mod app;

pub use app::GridApp;
