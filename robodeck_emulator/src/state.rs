//! Robot state and the single-tick step.
//!
//! `RobotState` is everything the engine lock guards: presets, live
//! telemetry, the deferred-action stack, the RNG and the cycle statistics.
//! It has no threads of its own; the engine drives it.
//!
//! # One Tick
//!
//! ```text
//!   push transition(commanded task)   ─┐
//!   push do_jitter                     │ LIFO: jitter runs first
//!   drain until the stack is empty    ─┘
//!   push update_battery               (seed for the next tick)
//!   reset_value(temperature, voltages)
//!   record cycle statistics
//! ```

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use robodeck_common::consts::*;
use robodeck_common::prelude::*;
use tracing::{debug, info, warn};

use crate::actions::{ActionStack, DeferredAction};
use crate::config::EngineConfig;
use crate::debug::debug_data;
use crate::jitter::{bounded_jitter, bounded_jitter_down, generate_random, reset_value};
use crate::params::{ConfigParams, ParamName, ParamValue};
use crate::telemetry::Telemetry;

// Upper bound of the per-tick jitter amount for each quantity.
const STM_TEMP_JITTER: f64 = 0.5;
const BATTERY_VOLTAGE_JITTER: f64 = 0.5;
const CONSUMED_STAIN_JITTER: f64 = 5.0;
const STAINED_AREA_JITTER: f64 = 2.0;
const GAP_RX_JITTER: f64 = 10.0;
const AVERAGE_WIDTH_JITTER: f64 = 1.0;
const CLIFF_JITTER: f64 = 2.0;
const SEARCH_STOP_ANGLE_JITTER: f64 = 3.0;

/// Ticks between periodic debug summaries.
const STATS_LOG_EVERY: u64 = 60;

/// Cycle statistics for tick loop monitoring.
///
/// Overruns are counted in [`Telemetry::missed_slow_cycles`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Ticks executed.
    pub tick_count: u64,
    /// Longest observed critical section.
    pub max_tick_time_us: u64,
    /// Sum of critical section times.
    pub total_tick_time_us: u64,
}

impl TickStats {
    pub fn avg_tick_time_us(&self) -> u64 {
        self.total_tick_time_us.checked_div(self.tick_count).unwrap_or(0)
    }
}

/// Result of one [`RobotState::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Actions popped and applied, in execution order.
    pub executed: Vec<DeferredAction>,
    /// Time spent in the step.
    pub elapsed: Duration,
}

/// State guarded by the engine lock.
#[derive(Debug)]
pub struct RobotState {
    params: ConfigParams,
    telemetry: Telemetry,
    updates: ActionStack,
    rng: SmallRng,
    stats: TickStats,
    tick_interval: Duration,
    temperature_reset_delta: f64,
    voltage_reset_delta: f64,
}

impl RobotState {
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            params: ConfigParams::default(),
            telemetry: Telemetry::baseline(),
            updates: ActionStack::new(),
            rng,
            stats: TickStats::default(),
            tick_interval: config.tick_interval(),
            temperature_reset_delta: config.temperature_reset_delta,
            voltage_reset_delta: config.voltage_reset_delta,
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────

    #[inline]
    pub fn params(&self) -> &ConfigParams {
        &self.params
    }

    #[inline]
    pub fn params_mut(&mut self) -> &mut ConfigParams {
        &mut self.params
    }

    #[inline]
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    #[inline]
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Pending actions, bottom of the stack first.
    pub fn pending_actions(&self) -> Vec<DeferredAction> {
        self.updates.snapshot()
    }

    /// Fresh debug reading group from the state's RNG.
    pub fn debug_data(&mut self) -> BTreeMap<String, f64> {
        debug_data(&mut self.rng)
    }

    // ─── Commands ───────────────────────────────────────────────────

    /// Queue an action for the next drain.
    pub fn schedule(&mut self, action: DeferredAction) {
        self.updates.push(action);
    }

    /// Command a task.
    ///
    /// `Pause` takes effect at once. Every other task is established by its
    /// entry action on the next drain.
    pub fn command_task(&mut self, task: RobotTask) {
        self.params.store_robot_task(task);
        match DeferredAction::entering(task) {
            Some(action) => {
                self.updates.push(action);
                info!("Robot task set to {} (queued {})", task.name(), action.name());
            }
            None => {
                self.telemetry.set_idle();
                info!("Robot task set to {}", task.name());
            }
        }
    }

    /// Command a task by raw code. Unknown codes are logged and ignored.
    pub fn command_task_code(&mut self, code: u8) -> bool {
        match RobotTask::from_u8(code) {
            Some(task) => {
                self.command_task(task);
                true
            }
            None => {
                warn!("Ignoring unknown robot task code {}", code);
                false
            }
        }
    }

    /// Write a preset. The commanded task goes through [`Self::command_task`].
    pub fn set_param(&mut self, name: ParamName, value: &ParamValue) -> bool {
        if name != ParamName::RobotTask {
            return self.params.set(name, value);
        }
        match value.as_code() {
            Some(code) => self.command_task_code(code),
            None => {
                warn!("Expected an integral task code for {}, got {}", name, value);
                false
            }
        }
    }

    /// Board "defaults" command: green health, zeroed voltages, idle.
    pub fn set_defaults(&mut self) {
        self.telemetry.robot_health = RobotHealth::Green;
        self.telemetry.battery_voltage_1 = 0.0;
        self.telemetry.battery_voltage_2 = 0.0;
        self.telemetry.set_idle();
        info!("Board defaults restored");
    }

    // ─── Actions ────────────────────────────────────────────────────

    /// Apply one deferred action.
    pub fn apply(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::Jitter => self.do_jitter(),
            DeferredAction::UpdateBattery => {
                self.telemetry.update_battery();
                debug!(
                    "Battery at {:.1}%, health {:?}",
                    self.telemetry.battery_voltage_percentage(),
                    self.telemetry.robot_health
                );
            }
            _ => {
                if let Some((detailed, simple, next)) = action.outcome() {
                    self.telemetry.detailed_robot_task = detailed;
                    self.telemetry.simple_robot_task = simple;
                    if let Some(next) = next {
                        self.params.store_robot_task(next);
                    }
                    debug!("{}: executing {:?}/{:?}", action.name(), detailed, simple);
                }
            }
        }
    }

    fn do_jitter(&mut self) {
        let task = self.params.robot_task();
        let rng = &mut self.rng;
        let t = &mut self.telemetry;

        t.stm_temp = wiggle(rng, t.stm_temp, STM_TEMP_BOUNDS, STM_TEMP_JITTER);
        t.battery_voltage_1 = wiggle_down(
            rng,
            t.battery_voltage_1,
            BATTERY_VOLTAGE_BOUNDS,
            BATTERY_VOLTAGE_JITTER,
        );
        t.battery_voltage_2 = wiggle_down(
            rng,
            t.battery_voltage_2,
            BATTERY_VOLTAGE_BOUNDS,
            BATTERY_VOLTAGE_JITTER,
        );

        if task.is_staining() {
            if t.consumed_stain == 0.0 {
                t.consumed_stain = CONSUMED_STAIN_INITIAL;
            }
            t.consumed_stain = wiggle_down(
                rng,
                t.consumed_stain,
                CONSUMED_STAIN_BOUNDS,
                CONSUMED_STAIN_JITTER,
            );
            t.stained_area = wiggle(rng, t.stained_area, STAINED_AREA_BOUNDS, STAINED_AREA_JITTER);
        }

        if task.is_moving() {
            t.gap_1_rx = wiggle(rng, t.gap_1_rx, GAP_RX_BOUNDS, GAP_RX_JITTER);
            t.gap_2_rx = wiggle(rng, t.gap_2_rx, GAP_RX_BOUNDS, GAP_RX_JITTER);
            t.gap_3_rx = wiggle(rng, t.gap_3_rx, GAP_RX_BOUNDS, GAP_RX_JITTER);
            t.deck_board_average_width = wiggle(
                rng,
                t.deck_board_average_width,
                BOARD_AVERAGE_WIDTH_BOUNDS,
                AVERAGE_WIDTH_JITTER,
            );
            t.gap_average_width = wiggle(
                rng,
                t.gap_average_width,
                GAP_AVERAGE_WIDTH_BOUNDS,
                AVERAGE_WIDTH_JITTER,
            );
            t.bumpers_pressed = rng.gen_range(0..=BUMPER_MASK_MAX);
            t.left_cliff = wiggle(rng, t.left_cliff, CLIFF_BOUNDS, CLIFF_JITTER);
            t.right_cliff = wiggle(rng, t.right_cliff, CLIFF_BOUNDS, CLIFF_JITTER);
            t.successful_searches_percentage = generate_random(rng, 0.0, 1.0, 2);
            t.search_stop_angle_offset = wiggle(
                rng,
                t.search_stop_angle_offset,
                SEARCH_STOP_ANGLE_BOUNDS,
                SEARCH_STOP_ANGLE_JITTER,
            );
        }

        if task == RobotTask::Pause {
            t.reset_live();
        }
    }

    // ─── Tick ───────────────────────────────────────────────────────

    /// Run one simulation step.
    ///
    /// The caller holds the engine lock for the whole step and sleeps
    /// outside it.
    pub fn step(&mut self) -> TickReport {
        let started = Instant::now();

        if let Some(transition) = DeferredAction::transition_from(self.params.robot_task()) {
            self.updates.push(transition);
        }
        self.updates.push(DeferredAction::Jitter);

        let mut executed = Vec::with_capacity(self.updates.len());
        while let Some(action) = self.updates.pop() {
            self.apply(action);
            executed.push(action);
        }

        debug!("Update stack empty after {} actions", executed.len());
        self.updates.push(DeferredAction::UpdateBattery);

        let t = &mut self.telemetry;
        t.stm_temp = reset_value(t.stm_temp, STM_TEMP_BASELINE, self.temperature_reset_delta);
        t.battery_voltage_1 = reset_value(
            t.battery_voltage_1,
            BATTERY_VOLTAGE_BASELINE,
            self.voltage_reset_delta,
        );
        t.battery_voltage_2 = reset_value(
            t.battery_voltage_2,
            BATTERY_VOLTAGE_BASELINE,
            self.voltage_reset_delta,
        );

        let elapsed = started.elapsed();
        self.record_tick(elapsed);
        TickReport { executed, elapsed }
    }

    fn record_tick(&mut self, elapsed: Duration) {
        let tick_time_us = elapsed.as_micros() as u64;
        self.stats.tick_count += 1;
        self.stats.total_tick_time_us += tick_time_us;
        if tick_time_us > self.stats.max_tick_time_us {
            self.stats.max_tick_time_us = tick_time_us;
        }

        if elapsed > self.tick_interval {
            let missed = &mut self.telemetry.missed_slow_cycles;
            *missed = missed.saturating_add(1);
            if *missed <= 10 || *missed % 1000 == 0 {
                warn!(
                    "Tick overrun #{}: took {}us (interval {}us)",
                    missed,
                    tick_time_us,
                    self.tick_interval.as_micros()
                );
            }
        }

        if self.stats.tick_count % STATS_LOG_EVERY == 0 {
            debug!(
                "Tick loop: {} ticks, avg={}us, max={}us, overruns={}",
                self.stats.tick_count,
                self.stats.avg_tick_time_us(),
                self.stats.max_tick_time_us,
                self.telemetry.missed_slow_cycles
            );
        }
    }
}

/// Bounded jitter with a freshly drawn amount in `[0, max]`.
fn wiggle(rng: &mut SmallRng, value: f64, (lower, upper): (f64, f64), max: f64) -> f64 {
    let amount = generate_random(rng, 0.0, max, 2);
    bounded_jitter(rng, value, lower, upper, amount)
}

/// Downward-biased variant of [`wiggle`].
fn wiggle_down(rng: &mut SmallRng, value: f64, (lower, upper): (f64, f64), max: f64) -> f64 {
    let amount = generate_random(rng, 0.0, max, 2);
    bounded_jitter_down(rng, value, lower, upper, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RobotState {
        RobotState::new(&EngineConfig {
            seed: Some(1),
            ..Default::default()
        })
    }

    fn pair(s: &RobotState) -> (DetailedRobotTask, SimpleRobotTask) {
        (
            s.telemetry().detailed_robot_task,
            s.telemetry().simple_robot_task,
        )
    }

    #[test]
    fn jitter_runs_before_transition() {
        let mut s = state();
        s.params_mut().store_robot_task(RobotTask::ExploreLeft);
        let report = s.step();
        assert_eq!(
            report.executed,
            [DeferredAction::Jitter, DeferredAction::ExploreLeft]
        );
        assert_eq!(s.pending_actions(), [DeferredAction::UpdateBattery]);
    }

    #[test]
    fn paused_tick_only_jitters_and_updates_battery() {
        let mut s = state();
        s.schedule(DeferredAction::UpdateBattery);
        let report = s.step();
        assert_eq!(
            report.executed,
            [DeferredAction::Jitter, DeferredAction::UpdateBattery]
        );
        assert_eq!(s.telemetry().gap_1_rx, 33.0);
        assert_eq!(s.telemetry().consumed_stain, 0.0);
    }

    #[test]
    fn pause_is_synchronous() {
        let mut s = state();
        s.command_task(RobotTask::StainRight);
        s.step();
        assert_eq!(
            pair(&s),
            (DetailedRobotTask::RobotAutoStainingRight, SimpleRobotTask::StainingRight)
        );

        s.command_task(RobotTask::Pause);
        assert_eq!(pair(&s), (DetailedRobotTask::RobotIdle, SimpleRobotTask::Idle));
        assert_eq!(s.params().robot_task(), RobotTask::Pause);
    }

    #[test]
    fn staining_draws_down_stain_from_full() {
        let mut s = state();
        s.command_task(RobotTask::StainLeft);
        s.step();
        let t = s.telemetry();
        assert!(t.consumed_stain <= 5000.0 && t.consumed_stain >= 4995.0);
        assert!((2.0..=999.0).contains(&t.stained_area));
        assert!(t.bumpers_pressed <= 16);
        assert!((0.0..=1.0).contains(&t.successful_searches_percentage));
    }

    #[test]
    fn explore_right_moves_navigation_values() {
        let mut s = state();
        s.command_task(RobotTask::ExploreRight);
        for _ in 0..20 {
            s.step();
        }
        let t = s.telemetry();
        assert_eq!(t.consumed_stain, 0.0);
        assert_ne!(
            (t.gap_1_rx, t.gap_2_rx, t.gap_3_rx),
            (33.0, 32.0, 35.5),
            "gap receivers never moved"
        );

        s.command_task(RobotTask::Pause);
        s.step();
        assert_eq!(s.telemetry().gap_1_rx, 33.0);
        assert_eq!(s.telemetry().left_cliff, 4.0);
    }

    #[test]
    fn drifting_values_stay_in_bounds() {
        let mut s = state();
        for _ in 0..500 {
            s.step();
            let t = s.telemetry();
            assert!((8.0..=60.0).contains(&t.stm_temp));
            assert!((0.5..=99.9).contains(&t.battery_voltage_1));
            assert!((0.5..=99.9).contains(&t.battery_voltage_2));
        }
    }

    #[test]
    fn low_battery_health_lasts_until_the_snap() {
        let mut s = state();
        s.telemetry.battery_voltage_1 = 5.0;
        s.telemetry.battery_voltage_2 = 10.0;
        s.schedule(DeferredAction::UpdateBattery);

        // Percentages and health are taken during the drain, before the
        // voltages snap back to baseline.
        s.step();
        let t = s.telemetry();
        assert_eq!(t.robot_health, RobotHealth::Red);
        assert!(t.battery_1_percentage <= 5.0);
        assert!(t.battery_2_percentage <= 10.0);
        assert_eq!((t.battery_voltage_1, t.battery_voltage_2), (99.9, 99.9));

        s.step();
        let t = s.telemetry();
        assert_eq!(t.robot_health, RobotHealth::Green);
        assert!(t.battery_1_percentage > 99.0);
    }

    #[test]
    fn task_code_and_param_routing() {
        let mut s = state();
        assert!(!s.command_task_code(5));
        assert_eq!(s.params().robot_task(), RobotTask::Pause);
        assert!(s.pending_actions().is_empty());

        assert!(s.set_param(ParamName::RobotTask, &ParamValue::Number(6.0)));
        assert_eq!(s.pending_actions(), [DeferredAction::CleanAir]);
        assert!(!s.set_param(ParamName::RobotTask, &ParamValue::Bool(true)));
        assert!(s.set_param(ParamName::DriveSpeed, &ParamValue::Number(18.0)));
        assert_eq!(s.params().drive_speed(), 18.0);
    }

    #[test]
    fn defaults_command() {
        let mut s = state();
        s.command_task(RobotTask::CleanAir);
        s.step();
        s.set_defaults();
        let t = s.telemetry();
        assert_eq!(t.battery_voltage_1, 0.0);
        assert_eq!(t.robot_health, RobotHealth::Green);
        assert_eq!(t.simple_robot_task, SimpleRobotTask::Idle);
    }

    #[test]
    fn stats_accumulate() {
        let mut s = state();
        for _ in 0..3 {
            s.step();
        }
        assert_eq!(s.stats().tick_count, 3);
        assert_eq!(s.telemetry().missed_slow_cycles, 0);
    }
}
