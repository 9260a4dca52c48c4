//! System-wide constants for the robodeck workspace.
//!
//! Single source of truth for telemetry baselines, parameter domains and
//! simulation timing. Imported by all crates; do not duplicate.

// ─── Timing ─────────────────────────────────────────────────────────

/// Default tick interval in milliseconds (one simulation step).
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Smallest accepted tick interval in milliseconds.
pub const TICK_INTERVAL_MS_MIN: u64 = 1;

/// Largest accepted tick interval in milliseconds.
pub const TICK_INTERVAL_MS_MAX: u64 = 60_000;

/// Extra tick intervals the loop waits after draining the action stack.
pub const UNDERFLOW_BACKOFF_TICKS: u32 = 3;

/// Upper bound for the underflow back-off.
pub const UNDERFLOW_BACKOFF_TICKS_MAX: u32 = 100;

// ─── Telemetry Baselines ────────────────────────────────────────────

/// Battery voltage baseline (percent scale on the current board revision).
pub const BATTERY_VOLTAGE_BASELINE: f64 = 99.9;

/// Battery percentage baseline.
pub const BATTERY_PERCENTAGE_BASELINE: f64 = 100.0;

/// Battery current baseline [mA].
pub const BATTERY_CURRENT_BASELINE: f64 = 150.0;

/// STM32 die temperature baseline [°C].
pub const STM_TEMP_BASELINE: f64 = 24.5;

/// Search stop angle offset baseline [deg].
pub const SEARCH_STOP_ANGLE_BASELINE: f64 = 0.0;

/// Successful search ratio baseline.
pub const SUCCESS_SEARCH_RATIO_BASELINE: f64 = 0.97;

/// Left cliff ultrasonic distance baseline.
pub const LEFT_CLIFF_BASELINE: f64 = 4.0;

/// Right cliff ultrasonic distance baseline.
pub const RIGHT_CLIFF_BASELINE: f64 = 3.5;

/// Gap receiver baselines (GAP1, GAP2, GAP3).
pub const GAP_RX_BASELINES: [f64; 3] = [33.0, 32.0, 35.5];

/// Deck board average width baseline [mm].
pub const BOARD_AVERAGE_WIDTH_BASELINE: f64 = 142.0;

/// Gap average width baseline [mm].
pub const GAP_AVERAGE_WIDTH_BASELINE: f64 = 9.0;

/// Consumed stain value set the first time a staining task runs.
pub const CONSUMED_STAIN_INITIAL: f64 = 5000.0;

// ─── Jitter Bounds ──────────────────────────────────────────────────

/// STM temperature jitter bounds.
pub const STM_TEMP_BOUNDS: (f64, f64) = (8.0, 60.0);

/// Battery voltage jitter bounds.
pub const BATTERY_VOLTAGE_BOUNDS: (f64, f64) = (0.5, 99.9);

/// Consumed stain jitter bounds.
pub const CONSUMED_STAIN_BOUNDS: (f64, f64) = (0.5, 5000.0);

/// Stained area jitter bounds.
pub const STAINED_AREA_BOUNDS: (f64, f64) = (2.0, 999.0);

/// Gap receiver jitter bounds.
pub const GAP_RX_BOUNDS: (f64, f64) = (0.0, 1000.0);

/// Deck board average width jitter bounds.
pub const BOARD_AVERAGE_WIDTH_BOUNDS: (f64, f64) = (60.0, 160.0);

/// Gap average width jitter bounds.
pub const GAP_AVERAGE_WIDTH_BOUNDS: (f64, f64) = (2.0, 20.0);

/// Bumper mask draw range (inclusive).
pub const BUMPER_MASK_MAX: u8 = 16;

/// Cliff distance jitter bounds.
pub const CLIFF_BOUNDS: (f64, f64) = (0.0, 200.0);

/// Search stop angle offset jitter bounds.
pub const SEARCH_STOP_ANGLE_BOUNDS: (f64, f64) = (-30.0, 30.0);

/// Default drift allowed for the STM temperature before it snaps back.
pub const TEMPERATURE_RESET_DELTA: f64 = 15.0;

/// Default drift allowed for battery voltages before they snap back.
pub const VOLTAGE_RESET_DELTA: f64 = 40.0;

// ─── Health Thresholds ──────────────────────────────────────────────

/// Battery percentage below which health is YELLOW.
pub const HEALTH_YELLOW_BELOW_PCT: f64 = 25.0;

/// Battery percentage below which health is RED.
pub const HEALTH_RED_BELOW_PCT: f64 = 10.0;

// ─── Parameter Domains (inclusive) ──────────────────────────────────

/// Drive speed domain.
pub const DRIVE_SPEED_RANGE: (f64, f64) = (8.0, 20.0);

/// Pump flow domain (left and right).
pub const PUMP_FLOW_RANGE: (f64, f64) = (1.0, 200.0);

/// Pre-gap search angle domain.
pub const PRE_GAP_SEARCH_ANGLE_RANGE: (f64, f64) = (0.0, 30.0);

/// Post-gap search angle domain.
pub const POST_GAP_SEARCH_ANGLE_RANGE: (f64, f64) = (0.0, 15.0);

/// Bumper and cliff reverse distance domain.
pub const REVERSE_DISTANCE_RANGE: (f64, f64) = (10.0, 30.0);

/// Stain delay distance domain.
pub const STAIN_DELAY_DISTANCE_RANGE: (f64, f64) = (0.0, 30.0);

/// Minimum cliff height domain.
pub const MINIMUM_CLIFF_HEIGHT_RANGE: (f64, f64) = (1.0, 10.0);

// ─── Parameter Defaults ─────────────────────────────────────────────

/// Default drive speed.
pub const DRIVE_SPEED_DEFAULT: f64 = 15.0;

/// Default pump flow (left and right).
pub const PUMP_FLOW_DEFAULT: f64 = 80.0;

/// Default pre-gap search angle.
pub const PRE_GAP_SEARCH_ANGLE_DEFAULT: f64 = 15.0;

/// Default post-gap search angle.
pub const POST_GAP_SEARCH_ANGLE_DEFAULT: f64 = 10.0;

/// Default bumper reverse distance.
pub const BUMPER_REVERSE_DISTANCE_DEFAULT: f64 = 15.0;

/// Default cliff reverse distance.
pub const CLIFF_REVERSE_DISTANCE_DEFAULT: f64 = 21.5;

/// Default stain delay distance.
pub const STAIN_DELAY_DISTANCE_DEFAULT: f64 = 18.0;

/// Default minimum cliff height.
pub const MINIMUM_CLIFF_HEIGHT_DEFAULT: f64 = 7.0;

// ─── Debug Telemetry ────────────────────────────────────────────────

/// Number of synthetic debug fields.
pub const DEBUG_FIELD_COUNT: usize = 15;

/// Upper bound of every debug field draw.
pub const DEBUG_FIELD_MAX: f64 = 20.0;

/// Decimal digits kept on debug field draws.
pub const DEBUG_FIELD_PRECISION: u32 = 4;
