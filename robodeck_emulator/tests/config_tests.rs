//! Config loading tests: the shipped sample, overrides, bad files.

use std::io::Write;
use std::path::Path;

use robodeck_common::prelude::*;
use robodeck_emulator::{EmulatorConfig, RunningRobot};
use tempfile::NamedTempFile;

#[test]
fn test_shipped_sample_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/emulator.toml");
    let config = EmulatorConfig::load(&path).expect("sample config parses");
    config.validate().expect("sample config is valid");

    let robot = RunningRobot::new(config.engine.clone()).unwrap();
    assert_eq!(robot.apply_overrides(&config.params), config.params.len());
}

#[test]
fn test_invalid_overrides_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[engine]
tick_interval_ms = 20
seed = 1

[params]
drive_speed = 25
stain_delay_distance = 12.5
gap_width = 7
board_width = 2
unknown_knob = 1
"#
    )
    .unwrap();
    file.flush().unwrap();

    let config = EmulatorConfig::load(file.path()).unwrap();
    let robot = RunningRobot::new(config.engine.clone()).unwrap();
    assert_eq!(robot.apply_overrides(&config.params), 2);

    let params = robot.params();
    assert_eq!(params.drive_speed(), 15.0);
    assert_eq!(params.stain_delay_distance(), 12.5);
    assert_eq!(params.gap_width(), GapWidth::Regular);
    assert_eq!(params.board_width(), DeckBoardWidth::W7Cm);
}

#[test]
fn test_out_of_range_engine_config_is_rejected() {
    let config = EmulatorConfig::from_toml("[engine]\ntick_interval_ms = 120000\n").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    assert!(RunningRobot::new(config.engine).is_err());
}

#[test]
fn test_missing_file() {
    let result = EmulatorConfig::load(Path::new("/nonexistent/robodeck/emulator.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}
