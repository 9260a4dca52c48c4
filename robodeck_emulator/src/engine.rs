//! Tick engine and process-wide robot handle.
//!
//! One lock guards the whole [`RobotState`]. The tick thread holds it for
//! a single step and sleeps outside it, on a condition variable, so
//! `stop_robot` wakes it immediately.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use robodeck_common::prelude::*;
use serde_json::{Map, Value};
use tracing::{debug, info, trace, warn};

use crate::actions::DeferredAction;
use crate::config::EngineConfig;
use crate::error::EmulatorError;
use crate::params::{ConfigParams, ParamName, ParamValue};
use crate::readings::{self, PowerReading, ReadingGroup, Readings};
use crate::state::{RobotState, TickReport, TickStats};
use crate::telemetry::Telemetry;

/// Name of the background tick thread.
pub const TICK_THREAD_NAME: &str = "robodeck-tick";

static ROBOT: OnceLock<RunningRobot> = OnceLock::new();

/// Process-wide robot, created with default settings on first use.
pub fn get_robot() -> &'static RunningRobot {
    ROBOT.get_or_init(RunningRobot::default)
}

/// Create the process-wide robot from `config`.
///
/// # Errors
/// `AlreadyInitialized` if the robot already exists (including implicitly
/// through [`get_robot`]), or a config error if validation fails.
pub fn init_global(config: EngineConfig) -> Result<&'static RunningRobot, EmulatorError> {
    let robot = RunningRobot::new(config)?;
    let mut created = false;
    let global = ROBOT.get_or_init(|| {
        created = true;
        robot
    });
    if created {
        Ok(global)
    } else {
        Err(EmulatorError::AlreadyInitialized)
    }
}

/// State shared with the tick thread.
struct Shared {
    state: Mutex<RobotState>,
    running: AtomicBool,
    stop: Mutex<bool>,
    wake: Condvar,
    idle_wait: Duration,
}

/// Handle to an emulated board and its tick loop.
pub struct RunningRobot {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Default for RunningRobot {
    fn default() -> Self {
        Self::build(&EngineConfig::default())
    }
}

/// Per-field telemetry getters. Each takes the lock once.
macro_rules! telemetry_getters {
    ($($field:ident: $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $field(&self) -> $ty {
                self.shared.state.lock().telemetry().$field
            }
        )*
    };
}

/// Typed preset setters forwarding to [`ConfigParams`].
macro_rules! param_setters {
    ($($setter:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $setter(&self, value: $ty) -> bool {
                self.shared.state.lock().params_mut().$setter(value)
            }
        )*
    };
}

impl RunningRobot {
    /// Create a stopped robot.
    ///
    /// # Errors
    /// Returns a config error if `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, EmulatorError> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &EngineConfig) -> Self {
        debug!(
            "RunningRobot created: tick={}ms, backoff={} ticks, seed={:?}",
            config.tick_interval_ms, config.underflow_backoff_ticks, config.seed
        );
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(RobotState::new(config)),
                running: AtomicBool::new(false),
                stop: Mutex::new(false),
                wake: Condvar::new(),
                idle_wait: config.idle_wait(),
            }),
            worker: Mutex::new(None),
        }
    }

    // ─── Lifecycle ──────────────────────────────────────────────────

    /// Seed a battery update and start the tick thread.
    ///
    /// # Errors
    /// `AlreadyRunning` if the loop is active, `Spawn` if the thread could
    /// not be created.
    pub fn start_robot(&self) -> Result<(), EmulatorError> {
        let mut worker = self.worker.lock();
        if worker.is_some() {
            return Err(EmulatorError::AlreadyRunning);
        }

        self.shared.state.lock().schedule(DeferredAction::UpdateBattery);
        *self.shared.stop.lock() = false;
        self.shared.running.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(TICK_THREAD_NAME.to_string())
            .spawn(move || run_loop(&shared))
            .map_err(|e| {
                self.shared.running.store(false, Ordering::SeqCst);
                EmulatorError::Spawn(e.to_string())
            })?;
        *worker = Some(handle);

        info!(
            "Robot started (tick loop wait {}ms)",
            self.shared.idle_wait.as_millis()
        );
        Ok(())
    }

    /// Signal the tick thread and wait for it to exit. No-op when stopped.
    ///
    /// # Errors
    /// `WorkerPanicked` if the tick thread panicked.
    pub fn stop_robot(&self) -> Result<(), EmulatorError> {
        let mut worker = self.worker.lock();
        let Some(handle) = worker.take() else {
            debug!("stop_robot: robot is not running");
            return Ok(());
        };

        self.shared.running.store(false, Ordering::SeqCst);
        *self.shared.stop.lock() = true;
        self.shared.wake.notify_all();

        handle.join().map_err(|_| EmulatorError::WorkerPanicked)?;
        info!("Robot stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Run one step on the calling thread, without sleeping.
    pub fn tick(&self) -> TickReport {
        self.shared.state.lock().step()
    }

    pub fn stats(&self) -> TickStats {
        self.shared.state.lock().stats()
    }

    /// Pending deferred actions, bottom of the stack first.
    pub fn pending_actions(&self) -> Vec<DeferredAction> {
        self.shared.state.lock().pending_actions()
    }

    // ─── Telemetry ──────────────────────────────────────────────────

    /// Consistent snapshot of every telemetry value.
    pub fn telemetry(&self) -> Telemetry {
        self.shared.state.lock().telemetry().clone()
    }

    telemetry_getters! {
        simple_robot_task: SimpleRobotTask,
        detailed_robot_task: DetailedRobotTask,
        consumed_capacity: f64,
        consumed_stain: f64,
        stained_area: f64,
        robot_health: RobotHealth,
        robot_health_detailed: u16,
        battery_voltage_1: f64,
        battery_voltage_2: f64,
        battery_1_percentage: f64,
        battery_2_percentage: f64,
        battery_current: f64,
        stm_temp: f64,
        forward_stop_reason: ForwardStopReason,
        search_stop_reason: SearchStopReason,
        search_stop_angle_offset: f64,
        successful_searches_percentage: f64,
        left_cliff: f64,
        right_cliff: f64,
        bumpers_pressed: u8,
        gap_1_rx: f64,
        gap_2_rx: f64,
        gap_3_rx: f64,
        deck_board_average_width: f64,
        gap_average_width: f64,
        missed_slow_cycles: u32,
        missed_fast_cycles: u32,
    }

    /// Mean of the two battery voltages.
    pub fn get_battery_voltage_percentage(&self) -> f64 {
        self.shared.state.lock().telemetry().battery_voltage_percentage()
    }

    /// Fresh `DEBUG_1 … DEBUG_15` values.
    pub fn get_debug_data(&self) -> BTreeMap<String, f64> {
        self.shared.state.lock().debug_data()
    }

    /// Render a reading group.
    pub fn readings(&self, group: ReadingGroup) -> Readings {
        readings::render(group, &mut self.shared.state.lock())
    }

    pub fn power_reading(&self) -> PowerReading {
        PowerReading::from_telemetry(self.shared.state.lock().telemetry())
    }

    // ─── Presets ────────────────────────────────────────────────────

    /// Copy of every preset.
    pub fn params(&self) -> ConfigParams {
        self.shared.state.lock().params().clone()
    }

    /// Write a preset by name (`drive_speed` or `DRIVE_SPEED`).
    pub fn set(&self, name: &str, value: impl Into<ParamValue>) -> bool {
        let value = value.into();
        match ParamName::parse(name) {
            Some(param) => self.shared.state.lock().set_param(param, &value),
            None => {
                warn!("Unknown parameter {:?} (value {})", name, value);
                false
            }
        }
    }

    /// Read a preset by name. `None` for unknown names.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        let param = ParamName::parse(name)?;
        Some(self.shared.state.lock().params().get(param))
    }

    param_setters! {
        set_board_width: u8,
        set_gap_width: u8,
        set_gap_sensor_position: u8,
        set_cliff_mode: u8,
        set_scan_type: u8,
        set_drive_speed: f64,
        set_right_pump_flow: f64,
        set_left_pump_flow: f64,
        set_pre_gap_search_angle: f64,
        set_post_gap_search_angle: f64,
        set_bumper_reverse_distance: f64,
        set_cliff_reverse_distance: f64,
        set_stain_delay_distance: f64,
        set_minimum_cliff_height: f64,
    }

    pub fn set_dynamic_board_width_mode(&self, enabled: bool) {
        self.shared
            .state
            .lock()
            .params_mut()
            .set_dynamic_board_width_mode(enabled);
    }

    /// Command a task. `Pause` resets the executing task at once.
    pub fn set_robot_task(&self, task: RobotTask) {
        self.shared.state.lock().command_task(task);
    }

    /// Command a task by raw code; `false` and a warning for unknown codes.
    pub fn set_robot_task_code(&self, code: u8) -> bool {
        self.shared.state.lock().command_task_code(code)
    }

    /// Board "defaults" command.
    pub fn set_defaults(&self) {
        self.shared.state.lock().set_defaults();
    }

    /// Apply a `do_command` map under a single lock. Returns acceptance per
    /// key.
    pub fn apply_command(&self, command: &Map<String, Value>) -> BTreeMap<String, bool> {
        let mut state = self.shared.state.lock();
        command
            .iter()
            .map(|(key, raw)| {
                let accepted = match (
                    ParamName::parse(key),
                    serde_json::from_value::<ParamValue>(raw.clone()),
                ) {
                    (Some(param), Ok(value)) => state.set_param(param, &value),
                    (None, _) => {
                        warn!("Unknown command: {}", key);
                        false
                    }
                    (Some(_), Err(e)) => {
                        warn!("Value error for {}: {}", key, e);
                        false
                    }
                };
                (key.clone(), accepted)
            })
            .collect()
    }

    /// Apply startup overrides. Returns how many were accepted.
    pub fn apply_overrides(&self, overrides: &BTreeMap<String, ParamValue>) -> usize {
        let mut accepted = 0;
        for (key, value) in overrides {
            if self.set(key, value.clone()) {
                accepted += 1;
            }
        }
        if accepted < overrides.len() {
            warn!(
                "Applied {}/{} parameter overrides",
                accepted,
                overrides.len()
            );
        } else {
            debug!("Applied {} parameter overrides", accepted);
        }
        accepted
    }
}

impl Drop for RunningRobot {
    fn drop(&mut self) {
        if let Err(e) = self.stop_robot() {
            warn!("Tick thread did not stop cleanly: {}", e);
        }
    }
}

fn run_loop(shared: &Shared) {
    info!("Tick loop started");
    while shared.running.load(Ordering::SeqCst) {
        let report = shared.state.lock().step();
        trace!(
            "Tick executed {} actions in {}us",
            report.executed.len(),
            report.elapsed.as_micros()
        );

        let mut stop = shared.stop.lock();
        shared
            .wake
            .wait_while_for(&mut stop, |stopped| !*stopped, shared.idle_wait);
        if *stop {
            break;
        }
    }

    let stats = shared.state.lock().stats();
    info!(
        "Tick loop stopped after {} ticks (avg {}us, max {}us)",
        stats.tick_count,
        stats.avg_tick_time_us(),
        stats.max_tick_time_us
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn robot(tick_interval_ms: u64, underflow_backoff_ticks: u32) -> RunningRobot {
        RunningRobot::new(EngineConfig {
            tick_interval_ms,
            underflow_backoff_ticks,
            seed: Some(11),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = RunningRobot::new(EngineConfig {
            tick_interval_ms: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(EmulatorError::Config(_))));
    }

    #[test]
    fn start_twice_is_an_error() {
        let r = robot(5, 0);
        r.start_robot().unwrap();
        assert!(matches!(r.start_robot(), Err(EmulatorError::AlreadyRunning)));
        r.stop_robot().unwrap();
        assert!(!r.is_running());
    }

    #[test]
    fn stop_wakes_a_long_backoff() {
        let r = robot(200, 100);
        r.start_robot().unwrap();
        thread::sleep(Duration::from_millis(20));
        let started = Instant::now();
        r.stop_robot().unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(r.stats().tick_count >= 1);
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let r = robot(5, 0);
        assert!(r.stop_robot().is_ok());
        assert!(!r.is_running());
    }

    #[test]
    fn apply_command_reports_per_key() {
        let r = robot(5, 0);
        let command: Map<String, Value> = serde_json::from_str(
            r#"{"DRIVE_SPEED": 25, "LEFT_PUMP_FLOW": 120, "WARP": 1, "DYNAMIC_BOARD_WIDTH_MODE": "false"}"#,
        )
        .unwrap();
        let result = r.apply_command(&command);
        assert_eq!(result["DRIVE_SPEED"], false);
        assert_eq!(result["LEFT_PUMP_FLOW"], true);
        assert_eq!(result["WARP"], false);
        assert_eq!(result["DYNAMIC_BOARD_WIDTH_MODE"], true);
        let params = r.params();
        assert_eq!(params.drive_speed(), 15.0);
        assert_eq!(params.left_pump_flow(), 120.0);
        assert!(!params.dynamic_board_width_mode());
    }
}
