use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Color, LastAction, SessionToken},
    error::ParseError,
};

/// A user command routed from a host surface into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum GridCommand {
    Click { index: i64 },
    DoubleClick { index: i64 },
    Randomize,
    Reset,
}

impl FromStr for GridCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let malformed = || ParseError::Command(raw.to_string());

        match raw.split_once(':') {
            Some((verb, index)) => {
                let index = index.trim().parse::<i64>().map_err(|_| malformed())?;
                match verb.trim() {
                    "click" => Ok(GridCommand::Click { index }),
                    "doubleClick" | "double_click" => Ok(GridCommand::DoubleClick { index }),
                    _ => Err(malformed()),
                }
            }
            None => match raw {
                "randomize" => Ok(GridCommand::Randomize),
                "reset" => Ok(GridCommand::Reset),
                _ => Err(malformed()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub at: DateTime<Utc>,
    pub action: LastAction,
    pub action_count: u64,
    pub checksum: u32,
}

/// Read-only view of a controller at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cells: Vec<Color>,
    pub columns: usize,
    pub action_count: u64,
    pub last_action: Option<LastAction>,
    pub session: SessionToken,
    pub checksum: u32,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub last_reset_at: Option<DateTime<Utc>>,
    pub last_action_at: Option<DateTime<Utc>>,
    pub history: Vec<ActionLogEntry>,
}

impl GridSnapshot {
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.columns.max(1))
    }
}
