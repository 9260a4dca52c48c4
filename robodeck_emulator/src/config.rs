//! Emulator configuration.
//!
//! Loaded from TOML through [`ConfigLoader`]. Every section is optional;
//! a missing section falls back to its defaults.
//!
//! ```toml
//! [shared]
//! log_level = "debug"
//! service_name = "robodeck-emulator"
//!
//! [engine]
//! tick_interval_ms = 1000
//! underflow_backoff_ticks = 3
//! seed = 42
//! initial_task = "EXPLORE_LEFT"
//!
//! [params]
//! DRIVE_SPEED = 18
//! dynamic_board_width_mode = "false"
//! ```
//!
//! [`ConfigLoader`]: robodeck_common::config::ConfigLoader

use std::collections::BTreeMap;
use std::time::Duration;

use robodeck_common::consts::{
    TEMPERATURE_RESET_DELTA, TICK_INTERVAL_MS, TICK_INTERVAL_MS_MAX, TICK_INTERVAL_MS_MIN,
    UNDERFLOW_BACKOFF_TICKS, UNDERFLOW_BACKOFF_TICKS_MAX, VOLTAGE_RESET_DELTA,
};
use robodeck_common::prelude::*;
use serde::{Deserialize, Serialize};

use crate::params::ParamValue;

// ─── Top-Level Config ───────────────────────────────────────────────

/// Top-level emulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmulatorConfig {
    #[serde(default)]
    pub shared: SharedConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    /// Initial preset values, keyed by preset name. Applied through the
    /// validated setters, so bad entries are logged and skipped.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl EmulatorConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.engine.validate()
    }
}

// ─── Engine Config ──────────────────────────────────────────────────

/// Tick engine timing and randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tick interval [ms] (default: 1000).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Extra tick intervals to wait after the update stack drains (default: 3).
    #[serde(default = "default_backoff_ticks")]
    pub underflow_backoff_ticks: u32,

    /// RNG seed. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Drift beyond which the STM temperature snaps back [°C] (default: 15.0).
    #[serde(default = "default_temperature_reset_delta")]
    pub temperature_reset_delta: f64,

    /// Drift beyond which a battery voltage snaps back [%] (default: 40.0).
    #[serde(default = "default_voltage_reset_delta")]
    pub voltage_reset_delta: f64,

    /// Task commanded right after startup.
    #[serde(default)]
    pub initial_task: Option<RobotTask>,
}

fn default_tick_interval_ms() -> u64 {
    TICK_INTERVAL_MS
}
fn default_backoff_ticks() -> u32 {
    UNDERFLOW_BACKOFF_TICKS
}
fn default_temperature_reset_delta() -> f64 {
    TEMPERATURE_RESET_DELTA
}
fn default_voltage_reset_delta() -> f64 {
    VOLTAGE_RESET_DELTA
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            underflow_backoff_ticks: default_backoff_ticks(),
            seed: None,
            temperature_reset_delta: default_temperature_reset_delta(),
            voltage_reset_delta: default_voltage_reset_delta(),
            initial_task: None,
        }
    }
}

impl EngineConfig {
    /// Validate ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(TICK_INTERVAL_MS_MIN..=TICK_INTERVAL_MS_MAX).contains(&self.tick_interval_ms) {
            return Err(ConfigError::ValidationError(format!(
                "tick_interval_ms {} out of range [{}, {}]",
                self.tick_interval_ms, TICK_INTERVAL_MS_MIN, TICK_INTERVAL_MS_MAX
            )));
        }
        if self.underflow_backoff_ticks > UNDERFLOW_BACKOFF_TICKS_MAX {
            return Err(ConfigError::ValidationError(format!(
                "underflow_backoff_ticks {} out of range [0, {}]",
                self.underflow_backoff_ticks, UNDERFLOW_BACKOFF_TICKS_MAX
            )));
        }
        for (name, delta) in [
            ("temperature_reset_delta", self.temperature_reset_delta),
            ("voltage_reset_delta", self.voltage_reset_delta),
        ] {
            if !(delta.is_finite() && delta >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a non-negative number, got {delta}"
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Wait between ticks: one interval plus the underflow backoff.
    pub fn idle_wait(&self) -> Duration {
        self.tick_interval() * (1 + self.underflow_backoff_ticks)
    }
}
