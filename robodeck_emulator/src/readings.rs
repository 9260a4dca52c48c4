//! Reading groups as exposed to the host.
//!
//! The host addresses a group by its mapped code and gets back a flat
//! key → value map using the board's wire keys.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::params::{ConfigParams, ParamName};
use crate::state::RobotState;
use crate::telemetry::Telemetry;

/// Wire key → value.
pub type Readings = BTreeMap<&'static str, Value>;

/// Mapped reading group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingGroup {
    /// `"1"`: task, consumables, health and search results.
    Status,
    /// `"2"`: gap receivers, cliffs and bumpers.
    Navigation,
    /// `"3"`: fifteen pseudo-random diagnostics.
    Debug,
    /// `"4"`: current presets.
    Preset,
}

impl ReadingGroup {
    pub const ALL: [Self; 4] = [Self::Status, Self::Navigation, Self::Debug, Self::Preset];

    /// Resolve a mapped name (`"1"` … `"4"`).
    pub fn from_mapping(name: &str) -> Option<Self> {
        match name.trim() {
            "1" => Some(Self::Status),
            "2" => Some(Self::Navigation),
            "3" => Some(Self::Debug),
            "4" => Some(Self::Preset),
            _ => None,
        }
    }

    pub const fn mapping(self) -> &'static str {
        match self {
            Self::Status => "1",
            Self::Navigation => "2",
            Self::Debug => "3",
            Self::Preset => "4",
        }
    }
}

/// Power sensor reading. `volts` carries the battery percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerReading {
    pub volts: f64,
    pub amps: f64,
    pub watts: f64,
}

impl PowerReading {
    pub fn from_telemetry(t: &Telemetry) -> Self {
        Self {
            volts: t.battery_voltage_percentage(),
            amps: t.battery_current,
            watts: 0.0,
        }
    }
}

/// Render one group. The debug group draws from the state's RNG.
pub fn render(group: ReadingGroup, state: &mut RobotState) -> Readings {
    match group {
        ReadingGroup::Status => status(state.telemetry(), state.params()),
        ReadingGroup::Navigation => navigation(state.telemetry()),
        ReadingGroup::Preset => preset(state.params()),
        ReadingGroup::Debug => {
            let data = state.debug_data();
            // Keys are DEBUG_1 … DEBUG_15; map onto static wire keys.
            DEBUG_KEYS
                .iter()
                .filter_map(|key| data.get(*key).map(|v| (*key, json!(v))))
                .collect()
        }
    }
}

const DEBUG_KEYS: [&str; 15] = [
    "DEBUG_1", "DEBUG_2", "DEBUG_3", "DEBUG_4", "DEBUG_5", "DEBUG_6", "DEBUG_7", "DEBUG_8",
    "DEBUG_9", "DEBUG_10", "DEBUG_11", "DEBUG_12", "DEBUG_13", "DEBUG_14", "DEBUG_15",
];

fn status(t: &Telemetry, p: &ConfigParams) -> Readings {
    BTreeMap::from([
        ("CONSUMED_CAP", json!(t.consumed_capacity)),
        ("CONSUMED_STAIN", json!(t.consumed_stain)),
        ("FWD_STOP_REASON", json!(t.forward_stop_reason as u8)),
        ("ROBOT_HEALTH", json!(t.robot_health as u8)),
        ("ROBOT_MODE", json!(p.robot_task() as u8)),
        ("SEARCH_STOP_ANGLE", json!(t.search_stop_angle_offset)),
        ("SEARCH_STOP_REASON", json!(t.search_stop_reason as u8)),
        ("STAINED_AREA", json!(t.stained_area)),
        ("ST_TEMP", json!(t.stm_temp)),
        ("SUCC_SEARCH_RATIO", json!(t.successful_searches_percentage)),
    ])
}

fn navigation(t: &Telemetry) -> Readings {
    BTreeMap::from([
        ("BUMPER", json!(t.bumpers_pressed)),
        ("GAP1", json!(t.gap_1_rx)),
        ("GAP2", json!(t.gap_2_rx)),
        ("GAP3", json!(t.gap_3_rx)),
        ("MISSED_SLOW_CYCLES", json!(t.missed_slow_cycles)),
        ("US_LEFT", json!(t.left_cliff)),
        ("US_RIGHT", json!(t.right_cliff)),
    ])
}

fn preset(p: &ConfigParams) -> Readings {
    ParamName::ALL
        .into_iter()
        .map(|name| {
            let value = match name {
                ParamName::DynamicBoardWidthMode => {
                    json!(if p.dynamic_board_width_mode() { "ON" } else { "OFF" })
                }
                _ if name.is_enumerated() => json!(p.get(name).as_code()),
                _ => json!(p.get(name)),
            };
            (name.wire_key(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn state() -> RobotState {
        RobotState::new(&EngineConfig {
            seed: Some(3),
            ..Default::default()
        })
    }

    #[test]
    fn mapping_codes() {
        for group in ReadingGroup::ALL {
            assert_eq!(ReadingGroup::from_mapping(group.mapping()), Some(group));
        }
        assert_eq!(ReadingGroup::from_mapping("5"), None);
        assert_eq!(ReadingGroup::from_mapping(""), None);
    }

    #[test]
    fn navigation_uses_wire_keys() {
        let mut s = state();
        let r = render(ReadingGroup::Navigation, &mut s);
        assert_eq!(r.len(), 7);
        assert_eq!(r["GAP1"], json!(33.0));
        assert_eq!(r["US_RIGHT"], json!(3.5));
        assert_eq!(r["BUMPER"], json!(0));
    }

    #[test]
    fn status_reports_codes() {
        let mut s = state();
        s.command_task(robodeck_common::prelude::RobotTask::ExploreLeft);
        let r = render(ReadingGroup::Status, &mut s);
        assert_eq!(r["ROBOT_MODE"], json!(3));
        assert_eq!(r["ROBOT_HEALTH"], json!(0));
        assert_eq!(r["ST_TEMP"], json!(24.5));
    }

    #[test]
    fn preset_renders_width_mode_as_on_off() {
        let mut s = state();
        let r = render(ReadingGroup::Preset, &mut s);
        assert_eq!(r["DYNAMIC_BOARD_WIDTH_MODE"], json!("ON"));
        assert_eq!(r["DRIVE_SPEED"], json!(15.0));
        assert_eq!(r["CLIFF_SENSOR_MODE"], json!(0));
        assert_eq!(r["ROBOT_TASK"], json!(0));
        assert_eq!(r.len(), ParamName::ALL.len());
    }

    #[test]
    fn debug_group_has_fifteen_values() {
        let mut s = state();
        let r = render(ReadingGroup::Debug, &mut s);
        assert_eq!(r.len(), 15);
        assert!(r.contains_key("DEBUG_15"));
    }

    #[test]
    fn power_reading_uses_battery_percentage() {
        let s = state();
        let p = PowerReading::from_telemetry(s.telemetry());
        assert!((p.volts - 99.9).abs() < 1e-9);
        assert_eq!(p.amps, 150.0);
        assert_eq!(p.watts, 0.0);
    }
}
