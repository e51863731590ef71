use super::*;

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    env_from(&[])
}

#[test]
fn defaults_match_color_chaos_preset() {
    let settings = settings_from_sources(None, no_env()).expect("defaults");
    assert_eq!(settings, GridConfig::preset(GridPreset::ColorChaos));
    assert_eq!(settings.size, 25);
    assert_eq!(settings.initial_fill, Color::White);
    assert_eq!(settings.reset_fill, Color::Yellow);
    assert_eq!(settings.randomize_coverage, RandomizeCoverage::CeilHalf);
    assert_eq!(settings.checksum.modulus, 1000);
    assert_eq!(settings.seed, None);
}

#[test]
fn corrected_preset_resets_to_initial_fill_and_randomizes_everything() {
    let settings = GridConfig::preset(GridPreset::Corrected);
    assert_eq!(settings.reset_fill, settings.initial_fill);
    assert_eq!(settings.randomize_coverage, RandomizeCoverage::Full);
}

#[test]
fn file_values_override_preset() {
    let raw = r#"
        preset = "chaos"
        size = 16
        columns = 4
        palette = ["black", "gray"]
        reset_fill = "white"
        seed = 42
    "#;
    let settings = settings_from_sources(Some(raw), no_env()).expect("file settings");
    assert_eq!(settings.size, 16);
    assert_eq!(settings.columns, 4);
    assert_eq!(settings.palette, vec![Color::Black, Color::Gray]);
    assert_eq!(settings.reset_fill, Color::White);
    assert_eq!(settings.randomize_coverage, RandomizeCoverage::FloorHalf);
    assert_eq!(settings.checksum.encoding, CellEncoding::Initial);
    assert_eq!(settings.checksum.modulus, 773);
    assert_eq!(settings.seed, Some(42));
}

#[test]
fn env_overrides_file() {
    let raw = r#"size = 16"#;
    let env = env_from(&[
        ("APP__GRID_SIZE", "9"),
        ("APP__GRID_COLUMNS", "3"),
        ("APP__GRID_PALETTE", "orange, pink"),
        ("APP__GRID_RANDOMIZE_COVERAGE", "full"),
        ("APP__GRID_CHECKSUM_MODULUS", "97"),
        ("APP__GRID_SEED", "7"),
    ]);
    let settings = settings_from_sources(Some(raw), env).expect("env settings");
    assert_eq!(settings.size, 9);
    assert_eq!(settings.columns, 3);
    assert_eq!(settings.palette, vec![Color::Orange, Color::Pink]);
    assert_eq!(settings.randomize_coverage, RandomizeCoverage::Full);
    assert_eq!(settings.checksum.modulus, 97);
    assert_eq!(settings.seed, Some(7));
}

#[test]
fn env_preset_wins_over_file_preset() {
    let raw = r#"preset = "chaos""#;
    let env = env_from(&[("APP__GRID_PRESET", "huge_chaos")]);
    let settings = settings_from_sources(Some(raw), env).expect("preset");
    assert_eq!(settings.checksum.modulus, 997);
    assert_eq!(settings.randomize_coverage, RandomizeCoverage::CeilHalf);
}

#[test]
fn unparsable_env_values_are_ignored() {
    let env = env_from(&[
        ("APP__GRID_SIZE", "lots"),
        ("APP__GRID_PALETTE", "red,magenta"),
        ("APP__GRID_RESET_FILL", "beige"),
    ]);
    let settings = settings_from_sources(None, env).expect("settings");
    assert_eq!(settings, GridConfig::default());
}

#[test]
fn malformed_file_is_an_error() {
    assert!(settings_from_sources(Some("size = \"big\""), no_env()).is_err());
    assert!(settings_from_sources(Some("unknown_key = 1"), no_env()).is_err());
}

#[test]
fn invalid_values_fail_validation() {
    assert!(settings_from_sources(Some("size = 0"), no_env()).is_err());
    assert!(settings_from_sources(Some("columns = 0"), no_env()).is_err());
    assert!(settings_from_sources(Some("checksum_modulus = 0"), no_env()).is_err());
    assert!(settings_from_sources(Some("palette = []"), no_env()).is_err());
    assert!(settings_from_sources(Some(r#"palette = ["red", "red"]"#), no_env()).is_err());
}

#[test]
fn validate_reports_palette_errors() {
    let mut config = GridConfig::default();
    config.palette = vec![Color::Blue, Color::Blue];
    assert_eq!(
        config.validate(),
        Err(ConfigError::Palette(PaletteError::Duplicate(Color::Blue)))
    );
}

#[test]
fn validation_failures_carry_invalid_config_code() {
    let mut config = GridConfig::default();
    config.palette.clear();
    let err = config.validate().expect_err("empty palette");
    assert_eq!(err, ConfigError::Palette(PaletteError::Empty));
    assert_eq!(err.code(), ErrorCode::InvalidConfig);
    assert_eq!(ConfigError::ZeroSize.code(), ErrorCode::InvalidConfig);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("chaos_grid_missing_{suffix}.toml"));
    assert!(load_settings(Some(&missing)).is_err());
}

#[test]
fn explicit_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("chaos_grid_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("grid.toml");
    fs::write(&path, "preset = \"corrected\"\nhistory_limit = 5\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.reset_fill, Color::White);
    assert_eq!(settings.history_limit, 5);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
