//! Speed estimation from rotation intervals.
//!
//! Called once per estimator period with the interval consumed from
//! [`SharedMeasurement`]. Each period is classified as:
//!
//! | Interval | Kind | Instantaneous speed |
//! |----------|------|---------------------|
//! | new non-zero value | [`IntervalKind::Fresh`] | `mm_per_rotation / interval` |
//! | [`NO_INTERVAL`] | [`IntervalKind::Missing`] | held |
//! | same as last period | [`IntervalKind::Stale`] | held |
//! | idle streak reaches the limit | [`IntervalKind::ForcedIdle`] | forced to 0 |
//!
//! # Average
//!
//! `average = (average + instantaneous) / 2`, applied once per period while the
//! instantaneous speed is above the idle threshold. This is a single-pole
//! filter with factor 1/2: the error to a constant input halves every period.
//!
//! # Known Limitation
//!
//! An interval identical to the previous period's is treated as stale. A wheel
//! turning at a cadence that reproduces exactly the same millisecond interval
//! in consecutive periods is indistinguishable from a stalled one and reads as
//! stopped after the idle streak limit.

use crate::config::SpeedoConfig;
use crate::display::SpeedReadout;
use crate::measurement::{NO_INTERVAL, SharedMeasurement};

/// Classification of one estimator period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalKind {
    /// A new interval arrived and the speed was recomputed.
    Fresh,
    /// No rotation was accepted since the previous period.
    Missing,
    /// The interval equals the one seen in the previous period.
    Stale,
    /// The idle streak reached its limit; speed was forced to zero.
    ForcedIdle,
}

impl IntervalKind {
    /// Short label for logs and the diagnostics footer.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Missing => "missing",
            Self::Stale => "stale",
            Self::ForcedIdle => "idle",
        }
    }
}

/// Estimator state carried across periods.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeedState {
    /// Speed from the most recent interval, mm/ms.
    pub instantaneous_speed: f32,
    /// Exponentially smoothed speed, mm/ms.
    pub average_speed: f32,
    /// Consecutive periods with an unchanged or missing interval.
    pub idle_streak_count: u8,
    /// Raw value consumed in the previous period (sentinel included).
    pub previous_interval_ms: u32,
}

impl SpeedState {
    /// Create a state at rest.
    pub const fn new() -> Self {
        Self {
            instantaneous_speed: 0.0,
            average_speed: 0.0,
            idle_streak_count: 0,
            previous_interval_ms: NO_INTERVAL,
        }
    }
}

/// Converts consumed intervals into instantaneous and average speed.
pub struct SpeedEstimator {
    config: SpeedoConfig,
    state: SpeedState,
}

impl SpeedEstimator {
    /// Create an estimator at rest.
    pub const fn new(config: SpeedoConfig) -> Self {
        Self {
            config,
            state: SpeedState::new(),
        }
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> &SpeedState { &self.state }

    /// Run one period: consume the shared interval and update the speeds.
    pub fn cycle(
        &mut self,
        shared: &SharedMeasurement,
        uptime_ms: u64,
    ) -> SpeedReadout {
        let interval_ms = shared.consume();
        let kind = self.update(interval_ms);

        SpeedReadout {
            instantaneous_speed: self.state.instantaneous_speed,
            average_speed: self.state.average_speed,
            uptime_ms,
            kind,
        }
    }

    /// Fold one period's interval into the state.
    pub fn update(
        &mut self,
        interval_ms: u32,
    ) -> IntervalKind {
        let kind = if interval_ms == NO_INTERVAL {
            self.register_idle(IntervalKind::Missing)
        } else if interval_ms == self.state.previous_interval_ms {
            self.register_idle(IntervalKind::Stale)
        } else {
            self.state.idle_streak_count = 0;
            self.state.instantaneous_speed = self.config.mm_per_rotation / interval_ms as f32;
            IntervalKind::Fresh
        };
        self.state.previous_interval_ms = interval_ms;

        if self.state.instantaneous_speed > self.config.idle_threshold {
            self.state.average_speed = (self.state.average_speed + self.state.instantaneous_speed) / 2.0;
        }

        kind
    }

    /// Clear the smoothed average (trip reset).
    pub fn reset_average(&mut self) { self.state.average_speed = 0.0; }

    fn register_idle(
        &mut self,
        kind: IntervalKind,
    ) -> IntervalKind {
        self.state.idle_streak_count = self.state.idle_streak_count.saturating_add(1);
        if self.state.idle_streak_count < self.config.idle_streak_limit {
            return kind;
        }

        self.state.instantaneous_speed = 0.0;
        self.state.idle_streak_count = 0;
        IntervalKind::ForcedIdle
    }
}

impl Default for SpeedEstimator {
    fn default() -> Self { Self::new(SpeedoConfig::DEFAULT) }
}

// =============================================================================
// Unit Tests
// =============================================================================
