//! Live telemetry model.
//!
//! Mirrors the board's readable status and navigation values. Owned by
//! the engine's state and only ever mutated under its lock; callers get
//! clones.

use robodeck_common::consts::*;
use robodeck_common::prelude::*;
use serde::Serialize;

/// Snapshot of every readable telemetry value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Telemetry {
    // Executing task
    pub simple_robot_task: SimpleRobotTask,
    pub detailed_robot_task: DetailedRobotTask,

    // Consumables
    pub consumed_capacity: f64,
    pub consumed_stain: f64,
    pub stained_area: f64,

    // Health & power
    pub robot_health: RobotHealth,
    /// Board-specific detailed health word.
    pub robot_health_detailed: u16,
    pub battery_voltage_1: f64,
    pub battery_voltage_2: f64,
    pub battery_1_percentage: f64,
    pub battery_2_percentage: f64,
    pub battery_current: f64,
    pub stm_temp: f64,

    // Search
    pub forward_stop_reason: ForwardStopReason,
    pub search_stop_reason: SearchStopReason,
    pub search_stop_angle_offset: f64,
    pub successful_searches_percentage: f64,

    // Navigation
    pub left_cliff: f64,
    pub right_cliff: f64,
    /// Raw bumper mask, see [`BumpersPressed`].
    pub bumpers_pressed: u8,
    pub gap_1_rx: f64,
    pub gap_2_rx: f64,
    pub gap_3_rx: f64,
    pub deck_board_average_width: f64,
    pub gap_average_width: f64,

    // Timing
    pub missed_slow_cycles: u32,
    pub missed_fast_cycles: u32,
}

impl Telemetry {
    /// All values at their power-on baselines.
    pub fn baseline() -> Self {
        Self {
            simple_robot_task: SimpleRobotTask::Idle,
            detailed_robot_task: DetailedRobotTask::RobotIdle,
            consumed_capacity: 0.0,
            consumed_stain: 0.0,
            stained_area: 0.0,
            robot_health: RobotHealth::Green,
            robot_health_detailed: 0,
            battery_voltage_1: BATTERY_VOLTAGE_BASELINE,
            battery_voltage_2: BATTERY_VOLTAGE_BASELINE,
            battery_1_percentage: BATTERY_PERCENTAGE_BASELINE,
            battery_2_percentage: BATTERY_PERCENTAGE_BASELINE,
            battery_current: BATTERY_CURRENT_BASELINE,
            stm_temp: STM_TEMP_BASELINE,
            forward_stop_reason: ForwardStopReason::default(),
            search_stop_reason: SearchStopReason::default(),
            search_stop_angle_offset: SEARCH_STOP_ANGLE_BASELINE,
            successful_searches_percentage: SUCCESS_SEARCH_RATIO_BASELINE,
            left_cliff: LEFT_CLIFF_BASELINE,
            right_cliff: RIGHT_CLIFF_BASELINE,
            bumpers_pressed: 0,
            gap_1_rx: GAP_RX_BASELINES[0],
            gap_2_rx: GAP_RX_BASELINES[1],
            gap_3_rx: GAP_RX_BASELINES[2],
            deck_board_average_width: BOARD_AVERAGE_WIDTH_BASELINE,
            gap_average_width: GAP_AVERAGE_WIDTH_BASELINE,
            missed_slow_cycles: 0,
            missed_fast_cycles: 0,
        }
    }

    /// Bumper mask as flags.
    #[inline]
    pub fn bumpers(&self) -> BumpersPressed {
        BumpersPressed::from_mask(self.bumpers_pressed)
    }

    /// Mean of the two battery voltages.
    #[inline]
    pub fn battery_voltage_percentage(&self) -> f64 {
        (self.battery_voltage_1 + self.battery_voltage_2) / 2.0
    }

    /// Put the executing task back to idle.
    pub fn set_idle(&mut self) {
        self.simple_robot_task = SimpleRobotTask::Idle;
        self.detailed_robot_task = DetailedRobotTask::RobotIdle;
    }

    /// Return the task-driven values (staining and navigation) to baseline.
    ///
    /// Temperature and battery voltages drift on every tick regardless of
    /// task and are left alone.
    pub fn reset_live(&mut self) {
        let base = Self::baseline();
        self.consumed_stain = base.consumed_stain;
        self.stained_area = base.stained_area;
        self.gap_1_rx = base.gap_1_rx;
        self.gap_2_rx = base.gap_2_rx;
        self.gap_3_rx = base.gap_3_rx;
        self.deck_board_average_width = base.deck_board_average_width;
        self.gap_average_width = base.gap_average_width;
        self.bumpers_pressed = base.bumpers_pressed;
        self.left_cliff = base.left_cliff;
        self.right_cliff = base.right_cliff;
        self.successful_searches_percentage = base.successful_searches_percentage;
        self.search_stop_angle_offset = base.search_stop_angle_offset;
    }

    /// Recompute battery percentages and the health level from the voltages.
    pub fn update_battery(&mut self) {
        self.battery_1_percentage = self.battery_voltage_1;
        self.battery_2_percentage = self.battery_voltage_2;
        let level = self.battery_voltage_percentage();
        self.robot_health = if level < HEALTH_RED_BELOW_PCT {
            RobotHealth::Red
        } else if level < HEALTH_YELLOW_BELOW_PCT {
            RobotHealth::Yellow
        } else {
            RobotHealth::Green
        };
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_battery_percentage() {
        let t = Telemetry::baseline();
        assert!((t.battery_voltage_percentage() - 99.9).abs() < 1e-9);
        assert_eq!(t.stm_temp, 24.5);
        assert_eq!(t.right_cliff, 3.5);
        assert!(t.bumpers().is_empty());
    }

    #[test]
    fn reset_live_keeps_drifting_values() {
        let mut t = Telemetry::baseline();
        t.stm_temp = 30.0;
        t.battery_voltage_1 = 70.0;
        t.gap_2_rx = 500.0;
        t.consumed_stain = 4000.0;
        t.bumpers_pressed = 9;
        t.reset_live();
        assert_eq!(t.stm_temp, 30.0);
        assert_eq!(t.battery_voltage_1, 70.0);
        assert_eq!(t.gap_2_rx, 32.0);
        assert_eq!(t.consumed_stain, 0.0);
        assert_eq!(t.bumpers_pressed, 0);
    }

    #[test]
    fn battery_update_derives_health() {
        let mut t = Telemetry::baseline();
        t.update_battery();
        assert_eq!(t.robot_health, RobotHealth::Green);
        assert_eq!(t.battery_1_percentage, 99.9);

        t.battery_voltage_1 = 20.0;
        t.battery_voltage_2 = 20.0;
        t.update_battery();
        assert_eq!(t.robot_health, RobotHealth::Yellow);

        t.battery_voltage_2 = 0.5;
        t.update_battery();
        assert_eq!(t.robot_health, RobotHealth::Red);
        assert_eq!(t.battery_2_percentage, 0.5);
    }
}
