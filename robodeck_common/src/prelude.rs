//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use robodeck_common::prelude::*;` and get
//! the most important types without listing individual paths.

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── Board Enumerations ─────────────────────────────────────────────
pub use crate::robot::device::{CliffMode, DeckBoardWidth, GapPosition, GapWidth, ScanType};
pub use crate::robot::status::{BumpersPressed, ForwardStopReason, RobotHealth, SearchStopReason};
pub use crate::robot::task::{DetailedRobotTask, RobotTask, SimpleRobotTask};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{TICK_INTERVAL_MS, UNDERFLOW_BACKOFF_TICKS};
