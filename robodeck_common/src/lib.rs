//! Robodeck Common Library
//!
//! This crate provides the board enumerations, shared constants and
//! configuration loading utilities used by the robodeck workspace crates.
//!
//! # Module Structure
//!
//! - [`robot`] - Task, status and device enumerations (wire codes)
//! - [`consts`] - Baselines, parameter domains and timing defaults
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use robodeck_common::prelude::*;
//!
//! assert_eq!(RobotTask::from_u8(3), Some(RobotTask::ExploreLeft));
//! assert_eq!(RobotTask::from_u8(5), None);
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod robot;
