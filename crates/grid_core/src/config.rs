use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use serde::Deserialize;
use shared::{
    domain::{CellEncoding, ChecksumScheme, Color, GridPreset, RandomizeCoverage},
    error::ErrorCode,
};
use thiserror::Error;

use crate::{
    history::DEFAULT_HISTORY_LIMIT,
    palette::{Palette, PaletteError},
};

const CONFIG_FILE_NAME: &str = "grid.toml";
const CONFIG_DIR_NAME: &str = "chaos_grid";
const ENV_PREFIX: &str = "APP__GRID_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroSize,
    #[error("grid must have at least one column")]
    ZeroColumns,
    #[error("checksum modulus must be non-zero")]
    ZeroModulus,
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidConfig
    }
}

/// Constants for one grid widget. Every known variant is a [`GridPreset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub size: usize,
    pub columns: usize,
    pub palette: Vec<Color>,
    pub initial_fill: Color,
    pub reset_fill: Color,
    pub randomize_coverage: RandomizeCoverage,
    pub checksum: ChecksumScheme,
    pub history_limit: usize,
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::preset(GridPreset::default())
    }
}

impl GridConfig {
    pub fn preset(preset: GridPreset) -> Self {
        let base = Self {
            size: 25,
            columns: 5,
            palette: vec![
                Color::Red,
                Color::Green,
                Color::Blue,
                Color::Yellow,
                Color::Purple,
            ],
            initial_fill: Color::White,
            reset_fill: Color::Yellow,
            randomize_coverage: RandomizeCoverage::CeilHalf,
            checksum: ChecksumScheme::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            seed: None,
        };

        match preset {
            GridPreset::ColorChaos => base,
            GridPreset::Chaos => Self {
                randomize_coverage: RandomizeCoverage::FloorHalf,
                checksum: ChecksumScheme {
                    encoding: CellEncoding::Initial,
                    modulus: 773,
                },
                ..base
            },
            GridPreset::HugeChaos => Self {
                checksum: ChecksumScheme {
                    encoding: CellEncoding::Initial,
                    modulus: 997,
                },
                ..base
            },
            GridPreset::Corrected => Self {
                reset_fill: base.initial_fill,
                randomize_coverage: RandomizeCoverage::Full,
                ..base
            },
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the invariants the controller relies on and builds the palette
    /// lookup table.
    pub fn validate(&self) -> Result<Palette, ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.checksum.modulus == 0 {
            return Err(ConfigError::ZeroModulus);
        }
        Ok(Palette::new(self.palette.clone())?)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    preset: Option<GridPreset>,
    size: Option<usize>,
    columns: Option<usize>,
    palette: Option<Vec<Color>>,
    initial_fill: Option<Color>,
    reset_fill: Option<Color>,
    randomize_coverage: Option<RandomizeCoverage>,
    checksum_encoding: Option<CellEncoding>,
    checksum_modulus: Option<u32>,
    history_limit: Option<usize>,
    seed: Option<u64>,
}

/// Loads settings from the preset defaults, then `grid.toml`, then the
/// `APP__GRID_*` environment. An explicit `path` must exist; the implicit
/// locations are optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<GridConfig> {
    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read grid config '{}'", path.display()))?,
        ),
        None => default_config_paths()
            .into_iter()
            .find_map(|candidate| fs::read_to_string(candidate).ok()),
    };

    settings_from_sources(raw.as_deref(), |key: &str| std::env::var(key).ok())
}

pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths
}

pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<GridConfig> {
    let file_cfg = match file {
        Some(raw) => toml::from_str::<FileConfig>(raw).context("failed to parse grid config")?,
        None => FileConfig::default(),
    };

    let preset = env_value::<GridPreset>(&env, "PRESET")
        .or(file_cfg.preset)
        .unwrap_or_default();
    let mut settings = GridConfig::preset(preset);

    if let Some(v) = file_cfg.size {
        settings.size = v;
    }
    if let Some(v) = file_cfg.columns {
        settings.columns = v;
    }
    if let Some(v) = file_cfg.palette {
        settings.palette = v;
    }
    if let Some(v) = file_cfg.initial_fill {
        settings.initial_fill = v;
    }
    if let Some(v) = file_cfg.reset_fill {
        settings.reset_fill = v;
    }
    if let Some(v) = file_cfg.randomize_coverage {
        settings.randomize_coverage = v;
    }
    if let Some(v) = file_cfg.checksum_encoding {
        settings.checksum.encoding = v;
    }
    if let Some(v) = file_cfg.checksum_modulus {
        settings.checksum.modulus = v;
    }
    if let Some(v) = file_cfg.history_limit {
        settings.history_limit = v;
    }
    if file_cfg.seed.is_some() {
        settings.seed = file_cfg.seed;
    }

    if let Some(v) = env_value(&env, "SIZE") {
        settings.size = v;
    }
    if let Some(v) = env_value(&env, "COLUMNS") {
        settings.columns = v;
    }
    if let Some(v) = env_palette(&env) {
        settings.palette = v;
    }
    if let Some(v) = env_value(&env, "INITIAL_FILL") {
        settings.initial_fill = v;
    }
    if let Some(v) = env_value(&env, "RESET_FILL") {
        settings.reset_fill = v;
    }
    if let Some(v) = env_value(&env, "RANDOMIZE_COVERAGE") {
        settings.randomize_coverage = v;
    }
    if let Some(v) = env_value(&env, "CHECKSUM_ENCODING") {
        settings.checksum.encoding = v;
    }
    if let Some(v) = env_value(&env, "CHECKSUM_MODULUS") {
        settings.checksum.modulus = v;
    }
    if let Some(v) = env_value(&env, "HISTORY_LIMIT") {
        settings.history_limit = v;
    }
    if let Some(v) = env_value(&env, "SEED") {
        settings.seed = Some(v);
    }

    settings.validate().context("invalid grid config")?;
    Ok(settings)
}

fn env_value<T>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{ENV_PREFIX}{name}");
    let raw = env(&key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%key, value = %raw, %err, "ignoring unparsable config override");
            None
        }
    }
}

fn env_palette(env: &impl Fn(&str) -> Option<String>) -> Option<Vec<Color>> {
    let key = format!("{ENV_PREFIX}PALETTE");
    let raw = env(&key)?;
    match raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse::<Color>)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(colors) => Some(colors),
        Err(err) => {
            tracing::warn!(%key, value = %raw, %err, "ignoring unparsable palette override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
