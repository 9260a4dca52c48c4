//! Error types for the emulator lifecycle.
//!
//! Validation failures on presets never surface here: they are logged and
//! reported as `false` by the setters. Only lifecycle misuse and config
//! problems are errors.

use robodeck_common::config::ConfigError;
use thiserror::Error;

/// Error type for emulator lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum EmulatorError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `start_robot` called while the tick loop is already running.
    #[error("Robot is already running")]
    AlreadyRunning,

    /// The process-wide robot was already initialised.
    #[error("Robot handle already initialised")]
    AlreadyInitialized,

    /// The tick thread could not be spawned.
    #[error("Failed to spawn tick thread: {0}")]
    Spawn(String),

    /// The tick thread panicked before it could be joined.
    #[error("Tick thread panicked")]
    WorkerPanicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmulatorError::Spawn("no threads left".to_string());
        assert!(err.to_string().contains("no threads left"));

        let err: EmulatorError = ConfigError::ValidationError("tick_interval_ms".into()).into();
        assert!(matches!(err, EmulatorError::Config(_)));
        assert!(err.to_string().contains("tick_interval_ms"));
    }
}
