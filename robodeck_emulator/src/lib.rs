//! # Robodeck Emulator Library
//!
//! Software stand-in for the robodeck controller board. Telemetry drifts
//! with bounded randomness according to the commanded task, presets are
//! validated on write, and a background tick loop drives the task state
//! machine.
//!
//! # Module Structure
//!
//! - [`engine`] - `RunningRobot`, tick thread and process-wide handle
//! - [`state`] - Lock-guarded state and the single-tick step
//! - [`actions`] - Deferred actions and the LIFO update stack
//! - [`params`] - Validated presets
//! - [`telemetry`] - Live telemetry model
//! - [`readings`] - Mapped reading groups and the power reading
//! - [`jitter`] - Bounded random perturbation helpers
//! - [`debug`] - Debug reading generator
//! - [`config`] - TOML configuration
//! - [`error`] - Lifecycle errors
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      robodeck_emulator                        │
//! │  ┌──────────────┐        ┌─────────────────────────────────┐  │
//! │  │ host callers │──lock─►│ Mutex<RobotState>               │  │
//! │  │ (getters,    │        │  params · telemetry · stack ·   │  │
//! │  │  setters)    │        │  rng · stats                    │  │
//! │  └──────────────┘        └───────────────▲─────────────────┘  │
//! │                                          │ lock per step      │
//! │                          ┌───────────────┴─────────────────┐  │
//! │                          │ robodeck-tick thread            │  │
//! │                          │  step → Condvar wait (stop)     │  │
//! │                          └─────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use robodeck_emulator::{EngineConfig, RunningRobot};
//! use robodeck_common::prelude::*;
//!
//! let robot = RunningRobot::new(EngineConfig { seed: Some(1), ..Default::default() }).unwrap();
//! assert!(!robot.set_drive_speed(25.0));
//! robot.set_robot_task(RobotTask::ExploreLeft);
//! robot.tick();
//! assert_eq!(robot.simple_robot_task(), SimpleRobotTask::ExploringLeft);
//! ```

pub mod actions;
pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod jitter;
pub mod params;
pub mod readings;
pub mod state;
pub mod telemetry;

// Re-export key types for convenience
pub use crate::config::{EmulatorConfig, EngineConfig};
pub use crate::engine::{RunningRobot, get_robot, init_global};
pub use crate::error::EmulatorError;
pub use crate::params::{ConfigParams, ParamName, ParamValue};
pub use crate::readings::{PowerReading, ReadingGroup};
pub use crate::telemetry::Telemetry;
