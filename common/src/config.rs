//! Calibration, timing and display configuration.
//!
//! All tunables are compile-time constants with validation assertions, so a
//! misconfigured build fails to compile instead of misbehaving on the bike.
//!
//! [`SpeedoConfig`] bundles the estimator and capture tunables so tests (and a
//! future calibration routine) can run the same code with other values.

// =============================================================================
// Event Capture
// =============================================================================

/// Minimum accepted time between two rotation edges, in milliseconds.
///
/// Edges closer together are contact bounce and are discarded. 100 ms with the
/// default wheel corresponds to ~70 km/h, well above plausible riding speed.
pub const DEBOUNCE_MS: u32 = 100;

// =============================================================================
// Speed Estimation
// =============================================================================

/// Distance travelled per wheel rotation (circumference) in millimeters.
///
/// Speeds are computed as `MM_PER_ROTATION / interval_ms`, i.e. in mm/ms,
/// which is numerically equal to m/s.
pub const MM_PER_ROTATION: f32 = 1953.0;

/// Estimator cycle length and display refresh period, in milliseconds.
pub const ESTIMATOR_PERIOD_MS: u64 = 1000;

/// Speed (mm/ms) at or below which the average is not updated.
///
/// 2.0 mm/ms = 7.2 km/h. Keeps walking pace and coasting to a stop out of
/// the average.
pub const IDLE_THRESHOLD: f32 = 2.0;

/// Consecutive periods with an unchanged or missing interval after which the
/// wheel is considered stopped and the instantaneous speed forced to zero.
pub const IDLE_STREAK_LIMIT: u8 = 2;

/// Slack allowed after a deadline before a wake counts as late.
pub const LATE_TOLERANCE_MS: u64 = 5;

/// Conversion factor from mm/ms (m/s) to km/h.
pub const MM_PER_MS_TO_KMH: f32 = 3.6;

// Compile-time validation
const _: () = assert!(DEBOUNCE_MS > 0);
const _: () = assert!(MM_PER_ROTATION > 0.0);
const _: () = assert!(ESTIMATOR_PERIOD_MS > LATE_TOLERANCE_MS);
const _: () = assert!(IDLE_STREAK_LIMIT > 0);
const _: () = assert!(IDLE_THRESHOLD >= 0.0);

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Screen center X coordinate. Used for centering the speed readout.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Height of the diagnostics footer band.
pub const FOOTER_HEIGHT: u32 = 20;

// =============================================================================
// Runtime Configuration Bundle
// =============================================================================

/// Capture and estimator tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedoConfig {
    /// See [`DEBOUNCE_MS`].
    pub debounce_ms: u32,
    /// See [`MM_PER_ROTATION`].
    pub mm_per_rotation: f32,
    /// See [`IDLE_THRESHOLD`].
    pub idle_threshold: f32,
    /// See [`IDLE_STREAK_LIMIT`].
    pub idle_streak_limit: u8,
    /// See [`ESTIMATOR_PERIOD_MS`].
    pub period_ms: u64,
}

impl SpeedoConfig {
    /// Configuration built from the compile-time constants.
    pub const DEFAULT: Self = Self {
        debounce_ms: DEBOUNCE_MS,
        mm_per_rotation: MM_PER_ROTATION,
        idle_threshold: IDLE_THRESHOLD,
        idle_streak_limit: IDLE_STREAK_LIMIT,
        period_ms: ESTIMATOR_PERIOD_MS,
    };
}

impl Default for SpeedoConfig {
    fn default() -> Self { Self::DEFAULT }
}
