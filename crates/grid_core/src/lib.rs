//! Grid interaction state machine: a fixed-size grid of palette colors
//! mutated by click, double click, randomize and reset commands.

use chrono::{DateTime, Utc};
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use shared::{
    domain::{Color, LastAction, SessionToken},
    error::GridError,
    protocol::{ActionLogEntry, GridCommand, GridSnapshot},
};
use tracing::{debug, info};

pub mod checksum;
pub mod config;
pub mod history;
pub mod palette;

pub use config::{load_settings, ConfigError, GridConfig};
pub use history::ActionHistory;
pub use palette::{Palette, PaletteError};

/// Owns one grid and its counters. Commands run to completion and a failing
/// command leaves every field untouched.
///
/// The random source is injected so tests can drive `randomize` and the
/// session token from a fixed seed.
pub struct GridController<R = Pcg64Mcg> {
    config: GridConfig,
    palette: Palette,
    cells: Vec<Color>,
    action_count: u64,
    last_action: Option<LastAction>,
    session: SessionToken,
    created_at: DateTime<Utc>,
    last_reset_at: Option<DateTime<Utc>>,
    last_action_at: Option<DateTime<Utc>>,
    history: ActionHistory,
    rng: R,
}

impl GridController<Pcg64Mcg> {
    pub fn seeded(config: GridConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, Pcg64Mcg::seed_from_u64(seed))
    }

    pub fn from_entropy(config: GridConfig) -> Result<Self, ConfigError> {
        Self::new(config, Pcg64Mcg::from_entropy())
    }

    /// Seeded when the config carries a seed, otherwise from OS entropy.
    pub fn from_config(config: GridConfig) -> Result<Self, ConfigError> {
        match config.seed {
            Some(seed) => Self::seeded(config, seed),
            None => Self::from_entropy(config),
        }
    }
}

impl<R: RngCore> GridController<R> {
    pub fn new(config: GridConfig, mut rng: R) -> Result<Self, ConfigError> {
        let palette = config.validate()?;
        let mut token_bytes = [0u8; 16];
        rng.fill_bytes(&mut token_bytes);
        let session = SessionToken::from_random_bytes(token_bytes);

        info!(
            %session,
            size = config.size,
            palette = palette.len(),
            "grid controller initialized"
        );

        Ok(Self {
            cells: vec![config.initial_fill; config.size],
            history: ActionHistory::new(config.history_limit),
            config,
            palette,
            action_count: 0,
            last_action: None,
            session,
            created_at: Utc::now(),
            last_reset_at: None,
            last_action_at: None,
            rng,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    pub fn action_count(&self) -> u64 {
        self.action_count
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
    }

    pub fn session(&self) -> SessionToken {
        self.session
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn checksum(&self) -> u32 {
        checksum::checksum(&self.cells, self.config.checksum)
    }

    /// `<session>:<checksum>`, usable as a render key.
    pub fn fingerprint(&self) -> String {
        format!("{}:{}", self.session, self.checksum())
    }

    pub fn apply(&mut self, command: GridCommand) -> Result<&[Color], GridError> {
        match command {
            GridCommand::Click { index } => self.click(index),
            GridCommand::DoubleClick { index } => self.double_click(index),
            GridCommand::Randomize => Ok(self.randomize()),
            GridCommand::Reset => Ok(self.reset()),
        }
    }

    /// Advances one cell to the next palette color and counts the action.
    pub fn click(&mut self, index: i64) -> Result<&[Color], GridError> {
        let slot = self.slot(index)?;
        let before = self.cells[slot];
        let after = self.palette.advance(before);
        self.cells[slot] = after;
        self.action_count += 1;
        debug!(
            index = slot,
            from = %before,
            to = %after,
            action_count = self.action_count,
            "cell clicked"
        );
        self.finish(LastAction::Click(slot));
        Ok(&self.cells)
    }

    /// Tags intent only: the grid and the counter stay as they are.
    pub fn double_click(&mut self, index: i64) -> Result<&[Color], GridError> {
        let slot = self.slot(index)?;
        debug!(index = slot, "cell double clicked");
        self.finish(LastAction::DoubleClick(slot));
        Ok(&self.cells)
    }

    /// Redraws the leading cells selected by the configured coverage; the
    /// rest keep their colors. Does not count as an action.
    pub fn randomize(&mut self) -> &[Color] {
        let limit = self.config.randomize_coverage.limit(self.cells.len());
        let palette = self.palette.colors();
        for cell in &mut self.cells[..limit] {
            *cell = palette[self.rng.gen_range(0..palette.len())];
        }
        debug!(
            limit,
            coverage = %self.config.randomize_coverage,
            "grid randomized"
        );
        self.finish(LastAction::Randomize);
        &self.cells
    }

    pub fn reset(&mut self) -> &[Color] {
        let fill = self.config.reset_fill;
        self.cells.fill(fill);
        self.action_count = 0;
        self.last_reset_at = Some(Utc::now());
        info!(%fill, session = %self.session, "grid reset");
        self.finish(LastAction::Reset);
        &self.cells
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.clone(),
            columns: self.config.columns,
            action_count: self.action_count,
            last_action: self.last_action,
            session: self.session,
            checksum: self.checksum(),
            fingerprint: self.fingerprint(),
            created_at: self.created_at,
            last_reset_at: self.last_reset_at,
            last_action_at: self.last_action_at,
            history: self.history.to_vec(),
        }
    }

    fn slot(&self, index: i64) -> Result<usize, GridError> {
        usize::try_from(index)
            .ok()
            .filter(|slot| *slot < self.cells.len())
            .ok_or(GridError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
    }

    fn finish(&mut self, action: LastAction) {
        let at = Utc::now();
        self.last_action = Some(action);
        self.last_action_at = Some(at);
        let entry = ActionLogEntry {
            at,
            action,
            action_count: self.action_count,
            checksum: self.checksum(),
        };
        self.history.record(entry);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
