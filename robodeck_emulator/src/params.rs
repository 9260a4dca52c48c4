//! Writable board presets.
//!
//! Each preset carries a closed domain: an inclusive numeric range or a set
//! of member codes. Setters never fail loudly. A rejected write is logged at
//! `warn` and reported as `false`; the previous value stays in place.

use std::fmt;

use robodeck_common::consts::*;
use robodeck_common::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

// ─── Parameter Names ────────────────────────────────────────────────

/// Name of a writable preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamName {
    BoardWidth,
    GapWidth,
    GapSensorPosition,
    CliffMode,
    ScanType,
    DriveSpeed,
    RightPumpFlow,
    LeftPumpFlow,
    PreGapSearchAngle,
    PostGapSearchAngle,
    BumperReverseDistance,
    CliffReverseDistance,
    StainDelayDistance,
    MinimumCliffHeight,
    DynamicBoardWidthMode,
    RobotTask,
}

impl ParamName {
    /// Every preset, in board order.
    pub const ALL: [Self; 16] = [
        Self::BoardWidth,
        Self::GapWidth,
        Self::GapSensorPosition,
        Self::CliffMode,
        Self::ScanType,
        Self::DriveSpeed,
        Self::RightPumpFlow,
        Self::LeftPumpFlow,
        Self::PreGapSearchAngle,
        Self::PostGapSearchAngle,
        Self::BumperReverseDistance,
        Self::CliffReverseDistance,
        Self::StainDelayDistance,
        Self::MinimumCliffHeight,
        Self::DynamicBoardWidthMode,
        Self::RobotTask,
    ];

    /// Key used on the wire (`do_command` maps and preset readings).
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::BoardWidth => "BOARD_WIDTH",
            Self::GapWidth => "GAP_WIDTH",
            Self::GapSensorPosition => "GAP_SENSOR_POSITION",
            Self::CliffMode => "CLIFF_SENSOR_MODE",
            Self::ScanType => "SCAN_TYPE",
            Self::DriveSpeed => "DRIVE_SPEED",
            Self::RightPumpFlow => "RIGHT_PUMP_FLOW",
            Self::LeftPumpFlow => "LEFT_PUMP_FLOW",
            Self::PreGapSearchAngle => "PRE_GAP_SEARCH_ANGLE",
            Self::PostGapSearchAngle => "POST_GAP_SEARCH_ANGLE",
            Self::BumperReverseDistance => "BUMPER_REVERSE_DISTANCE",
            Self::CliffReverseDistance => "CLIFF_REVERSE_DISTANCE",
            Self::StainDelayDistance => "STAIN_DELAY_DISTANCE",
            Self::MinimumCliffHeight => "MINIMUM_CLIFF_HEIGHT",
            Self::DynamicBoardWidthMode => "DYNAMIC_BOARD_WIDTH_MODE",
            Self::RobotTask => "ROBOT_TASK",
        }
    }

    /// Resolve a name given as `drive_speed` or `DRIVE_SPEED`.
    ///
    /// `CLIFF_MODE` is accepted as an alias for the board's
    /// `CLIFF_SENSOR_MODE`.
    pub fn parse(name: &str) -> Option<Self> {
        let key = name.trim().to_ascii_uppercase();
        if key == "CLIFF_MODE" {
            return Some(Self::CliffMode);
        }
        Self::ALL.into_iter().find(|p| p.wire_key() == key)
    }

    /// True for presets whose value is a member code.
    pub const fn is_enumerated(self) -> bool {
        matches!(
            self,
            Self::BoardWidth
                | Self::GapWidth
                | Self::GapSensorPosition
                | Self::CliffMode
                | Self::ScanType
                | Self::RobotTask
        )
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

// ─── Parameter Values ───────────────────────────────────────────────

/// Value written to or read from a preset.
///
/// Deserializes from a JSON/TOML bool, number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric payload. Strings and bools are not coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Member code payload: an integral number in `0..=255`.
    pub fn as_code(&self) -> Option<u8> {
        let n = self.as_number()?;
        if n.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&n) {
            Some(n as u8)
        } else {
            None
        }
    }

    /// Boolean payload. Also accepts the strings `true`/`false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u8> for ParamValue {
    fn from(value: u8) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

// ─── Store ──────────────────────────────────────────────────────────

#[inline]
fn in_range(value: f64, (lower, upper): (f64, f64)) -> bool {
    // NaN fails both comparisons.
    value >= lower && value <= upper
}

/// Board presets with their current values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigParams {
    board_width: DeckBoardWidth,
    gap_width: GapWidth,
    gap_sensor_position: GapPosition,
    cliff_mode: CliffMode,
    scan_type: ScanType,
    drive_speed: f64,
    right_pump_flow: f64,
    left_pump_flow: f64,
    pre_gap_search_angle: f64,
    post_gap_search_angle: f64,
    bumper_reverse_distance: f64,
    cliff_reverse_distance: f64,
    stain_delay_distance: f64,
    minimum_cliff_height: f64,
    dynamic_board_width_mode: bool,
    robot_task: RobotTask,
}

impl Default for ConfigParams {
    fn default() -> Self {
        Self {
            board_width: DeckBoardWidth::default(),
            gap_width: GapWidth::default(),
            gap_sensor_position: GapPosition::default(),
            cliff_mode: CliffMode::default(),
            scan_type: ScanType::default(),
            drive_speed: DRIVE_SPEED_DEFAULT,
            right_pump_flow: PUMP_FLOW_DEFAULT,
            left_pump_flow: PUMP_FLOW_DEFAULT,
            pre_gap_search_angle: PRE_GAP_SEARCH_ANGLE_DEFAULT,
            post_gap_search_angle: POST_GAP_SEARCH_ANGLE_DEFAULT,
            bumper_reverse_distance: BUMPER_REVERSE_DISTANCE_DEFAULT,
            cliff_reverse_distance: CLIFF_REVERSE_DISTANCE_DEFAULT,
            stain_delay_distance: STAIN_DELAY_DISTANCE_DEFAULT,
            minimum_cliff_height: MINIMUM_CLIFF_HEIGHT_DEFAULT,
            dynamic_board_width_mode: true,
            robot_task: RobotTask::default(),
        }
    }
}

/// Ranged `f64` setter plus getter.
macro_rules! ranged_param {
    ($(#[$doc:meta])* $field:ident, $setter:ident, $range:expr, $name:expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $field(&self) -> f64 {
            self.$field
        }

        #[doc = concat!("Set `", stringify!($field), "`; `false` if out of range.")]
        pub fn $setter(&mut self, value: f64) -> bool {
            if in_range(value, $range) {
                self.$field = value;
                true
            } else {
                warn!(param = %$name, value, range = ?$range, "Rejected out-of-range value");
                false
            }
        }
    };
}

/// Member-code setter plus getter.
macro_rules! enumerated_param {
    ($(#[$doc:meta])* $field:ident, $setter:ident, $ty:ty, $name:expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $field(&self) -> $ty {
            self.$field
        }

        #[doc = concat!("Set `", stringify!($field), "` from a raw code; `false` for non-members.")]
        pub fn $setter(&mut self, code: u8) -> bool {
            match <$ty>::from_u8(code) {
                Some(value) => {
                    self.$field = value;
                    true
                }
                None => {
                    warn!(param = %$name, code, "Rejected unknown member code");
                    false
                }
            }
        }
    };
}

impl ConfigParams {
    enumerated_param!(
        /// Deck board width (C0).
        board_width, set_board_width, DeckBoardWidth, ParamName::BoardWidth
    );
    enumerated_param!(
        /// Gap width (C1).
        gap_width, set_gap_width, GapWidth, ParamName::GapWidth
    );
    enumerated_param!(
        /// Gap sensor side (C2).
        gap_sensor_position, set_gap_sensor_position, GapPosition, ParamName::GapSensorPosition
    );
    enumerated_param!(
        /// Cliff sensor mode (C3).
        cliff_mode, set_cliff_mode, CliffMode, ParamName::CliffMode
    );
    enumerated_param!(
        /// Scan type (C7).
        scan_type, set_scan_type, ScanType, ParamName::ScanType
    );

    ranged_param!(
        /// Drive speed in cm/s.
        drive_speed, set_drive_speed, DRIVE_SPEED_RANGE, ParamName::DriveSpeed
    );
    ranged_param!(right_pump_flow, set_right_pump_flow, PUMP_FLOW_RANGE, ParamName::RightPumpFlow);
    ranged_param!(left_pump_flow, set_left_pump_flow, PUMP_FLOW_RANGE, ParamName::LeftPumpFlow);
    ranged_param!(
        /// Search angle before the gap, degrees.
        pre_gap_search_angle,
        set_pre_gap_search_angle,
        PRE_GAP_SEARCH_ANGLE_RANGE,
        ParamName::PreGapSearchAngle
    );
    ranged_param!(
        /// Search angle after the gap, degrees.
        post_gap_search_angle,
        set_post_gap_search_angle,
        POST_GAP_SEARCH_ANGLE_RANGE,
        ParamName::PostGapSearchAngle
    );
    ranged_param!(
        bumper_reverse_distance,
        set_bumper_reverse_distance,
        REVERSE_DISTANCE_RANGE,
        ParamName::BumperReverseDistance
    );
    ranged_param!(
        cliff_reverse_distance,
        set_cliff_reverse_distance,
        REVERSE_DISTANCE_RANGE,
        ParamName::CliffReverseDistance
    );
    ranged_param!(
        stain_delay_distance,
        set_stain_delay_distance,
        STAIN_DELAY_DISTANCE_RANGE,
        ParamName::StainDelayDistance
    );
    ranged_param!(
        minimum_cliff_height,
        set_minimum_cliff_height,
        MINIMUM_CLIFF_HEIGHT_RANGE,
        ParamName::MinimumCliffHeight
    );

    /// Whether the board re-measures deck board width while driving.
    #[inline]
    pub fn dynamic_board_width_mode(&self) -> bool {
        self.dynamic_board_width_mode
    }

    pub fn set_dynamic_board_width_mode(&mut self, enabled: bool) {
        self.dynamic_board_width_mode = enabled;
    }

    /// Commanded task.
    #[inline]
    pub fn robot_task(&self) -> RobotTask {
        self.robot_task
    }

    /// Store the commanded task. Scheduling side effects live in the engine.
    pub(crate) fn store_robot_task(&mut self, task: RobotTask) {
        self.robot_task = task;
    }

    /// Write a preset by name.
    ///
    /// The value kind must match the preset: a member code for enumerated
    /// presets, a number for ranged ones, a bool for the width mode flag.
    /// Writing `RobotTask` here only stores it; use the engine to schedule.
    pub fn set(&mut self, name: ParamName, value: &ParamValue) -> bool {
        if name == ParamName::DynamicBoardWidthMode {
            return match value.as_bool() {
                Some(enabled) => {
                    self.set_dynamic_board_width_mode(enabled);
                    true
                }
                None => {
                    warn!(param = %name, %value, "Expected a boolean");
                    false
                }
            };
        }

        if name.is_enumerated() {
            let Some(code) = value.as_code() else {
                warn!(param = %name, %value, "Expected an integral member code");
                return false;
            };
            return match name {
                ParamName::BoardWidth => self.set_board_width(code),
                ParamName::GapWidth => self.set_gap_width(code),
                ParamName::GapSensorPosition => self.set_gap_sensor_position(code),
                ParamName::CliffMode => self.set_cliff_mode(code),
                ParamName::ScanType => self.set_scan_type(code),
                _ => match RobotTask::from_u8(code) {
                    Some(task) => {
                        self.store_robot_task(task);
                        true
                    }
                    None => {
                        warn!(param = %name, code, "Rejected unknown member code");
                        false
                    }
                },
            };
        }

        let Some(number) = value.as_number() else {
            warn!(param = %name, %value, "Expected a number");
            return false;
        };
        match name {
            ParamName::DriveSpeed => self.set_drive_speed(number),
            ParamName::RightPumpFlow => self.set_right_pump_flow(number),
            ParamName::LeftPumpFlow => self.set_left_pump_flow(number),
            ParamName::PreGapSearchAngle => self.set_pre_gap_search_angle(number),
            ParamName::PostGapSearchAngle => self.set_post_gap_search_angle(number),
            ParamName::BumperReverseDistance => self.set_bumper_reverse_distance(number),
            ParamName::CliffReverseDistance => self.set_cliff_reverse_distance(number),
            ParamName::StainDelayDistance => self.set_stain_delay_distance(number),
            _ => self.set_minimum_cliff_height(number),
        }
    }

    /// Read a preset by name. Enumerated presets come back as their code.
    pub fn get(&self, name: ParamName) -> ParamValue {
        match name {
            ParamName::BoardWidth => (self.board_width as u8).into(),
            ParamName::GapWidth => (self.gap_width as u8).into(),
            ParamName::GapSensorPosition => (self.gap_sensor_position as u8).into(),
            ParamName::CliffMode => (self.cliff_mode as u8).into(),
            ParamName::ScanType => (self.scan_type as u8).into(),
            ParamName::DriveSpeed => self.drive_speed.into(),
            ParamName::RightPumpFlow => self.right_pump_flow.into(),
            ParamName::LeftPumpFlow => self.left_pump_flow.into(),
            ParamName::PreGapSearchAngle => self.pre_gap_search_angle.into(),
            ParamName::PostGapSearchAngle => self.post_gap_search_angle.into(),
            ParamName::BumperReverseDistance => self.bumper_reverse_distance.into(),
            ParamName::CliffReverseDistance => self.cliff_reverse_distance.into(),
            ParamName::StainDelayDistance => self.stain_delay_distance.into(),
            ParamName::MinimumCliffHeight => self.minimum_cliff_height.into(),
            ParamName::DynamicBoardWidthMode => self.dynamic_board_width_mode.into(),
            ParamName::RobotTask => (self.robot_task as u8).into(),
        }
    }
}
