//! Rotation edge capture with time-based debounce.
//!
//! Runs in interrupt context on every sensor edge. The reed switch bounces on
//! both close and release, so any edge closer than the debounce window to the
//! last accepted one is dropped without touching shared state.
//!
//! # Wraparound
//!
//! Timestamps are `u32` milliseconds since boot, which wrap after ~49.7 days.
//! Intervals use `wrapping_sub`, so an interval spanning the wrap is still
//! measured correctly.

use crate::config::{DEBOUNCE_MS, SpeedoConfig};
use crate::measurement::SharedMeasurement;

/// Result of feeding one edge to [`EventCapture::on_edge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// Edge arrived inside the debounce window and was discarded.
    Bounce,
    /// Edge accepted; `interval_ms` was published.
    Accepted { interval_ms: u32 },
}

/// Debounce state owned by the sensor interrupt.
pub struct EventCapture {
    debounce_ms: u32,
    last_accepted_ms: u32,
}

impl EventCapture {
    /// Create a capture with the default [`DEBOUNCE_MS`] window.
    pub const fn new() -> Self { Self::with_debounce(DEBOUNCE_MS) }

    /// Create a capture with a custom debounce window.
    ///
    /// The window is at least 1 ms: a zero interval would be indistinguishable
    /// from [`NO_INTERVAL`](crate::measurement::NO_INTERVAL).
    pub const fn with_debounce(debounce_ms: u32) -> Self {
        Self {
            debounce_ms: if debounce_ms == 0 { 1 } else { debounce_ms },
            last_accepted_ms: 0,
        }
    }

    /// Create a capture using the debounce window of `config`.
    pub const fn from_config(config: &SpeedoConfig) -> Self { Self::with_debounce(config.debounce_ms) }

    /// Handle one sensor edge observed at `now_ms`.
    ///
    /// Never blocks and never fails. An accepted edge publishes the interval
    /// since the previous accepted edge and becomes the new reference point;
    /// a bounce changes nothing.
    #[inline]
    pub fn on_edge(
        &mut self,
        now_ms: u32,
        shared: &SharedMeasurement,
    ) -> EdgeOutcome {
        let interval_ms = now_ms.wrapping_sub(self.last_accepted_ms);
        if interval_ms < self.debounce_ms {
            return EdgeOutcome::Bounce;
        }

        shared.publish(interval_ms);
        self.last_accepted_ms = now_ms;
        EdgeOutcome::Accepted { interval_ms }
    }

    /// Timestamp of the last accepted edge (0 before the first one).
    #[inline]
    pub const fn last_accepted_ms(&self) -> u32 { self.last_accepted_ms }
}

impl Default for EventCapture {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::NO_INTERVAL;

    #[test]
    fn test_first_edge_measures_from_boot() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::new();

        assert_eq!(capture.on_edge(5000, &shared), EdgeOutcome::Accepted { interval_ms: 5000 });
        assert_eq!(capture.last_accepted_ms(), 5000);
        assert_eq!(shared.consume(), 5000);
    }

    #[test]
    fn test_edge_inside_boot_window_is_bounce() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::new();

        assert_eq!(capture.on_edge(40, &shared), EdgeOutcome::Bounce);
        assert_eq!(capture.last_accepted_ms(), 0);
        assert_eq!(shared.consume(), NO_INTERVAL);
    }

    #[test]
    fn test_bounce_40ms_apart_discarded() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::new();

        capture.on_edge(1000, &shared);
        capture.on_edge(1391, &shared);
        assert_eq!(capture.on_edge(1431, &shared), EdgeOutcome::Bounce);

        // Published interval unchanged from before the bounce
        assert_eq!(shared.consume(), 391);
        assert_eq!(capture.last_accepted_ms(), 1391);
    }

    #[test]
    fn test_bounce_burst_leaves_state_untouched() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::new();
        capture.on_edge(2000, &shared);
        shared.consume();

        // Every edge is within 100 ms of the accepted one at t=2000
        for t in [2001, 2010, 2050, 2099] {
            assert_eq!(capture.on_edge(t, &shared), EdgeOutcome::Bounce);
            assert_eq!(capture.last_accepted_ms(), 2000);
        }
        assert_eq!(shared.consume(), NO_INTERVAL);
    }

    #[test]
    fn test_exact_debounce_boundary_accepted() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::new();
        capture.on_edge(1000, &shared);

        assert_eq!(
            capture.on_edge(1000 + DEBOUNCE_MS, &shared),
            EdgeOutcome::Accepted { interval_ms: DEBOUNCE_MS }
        );
    }

    #[test]
    fn test_interval_across_wrap() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::new();
        capture.on_edge(u32::MAX - 199, &shared);

        // 200 ms before the wrap plus 191 ms after it
        assert_eq!(capture.on_edge(191, &shared), EdgeOutcome::Accepted { interval_ms: 391 });
        assert_eq!(shared.consume(), 391);
    }

    #[test]
    fn test_custom_debounce() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::with_debounce(20);
        capture.on_edge(1000, &shared);

        assert_eq!(capture.on_edge(1030, &shared), EdgeOutcome::Accepted { interval_ms: 30 });
    }

    #[test]
    fn test_zero_debounce_never_publishes_sentinel() {
        let shared = SharedMeasurement::new();
        let mut capture = EventCapture::with_debounce(0);
        capture.on_edge(1000, &shared);
        shared.consume();

        // Same millisecond: rejected rather than published as "no interval"
        assert_eq!(capture.on_edge(1000, &shared), EdgeOutcome::Bounce);
        assert_eq!(capture.on_edge(1001, &shared), EdgeOutcome::Accepted { interval_ms: 1 });
        assert_eq!(shared.consume(), 1);
    }

    #[test]
    fn test_from_config_uses_config_debounce() {
        let shared = SharedMeasurement::new();
        let config = SpeedoConfig {
            debounce_ms: 250,
            ..SpeedoConfig::DEFAULT
        };
        let mut strict = EventCapture::from_config(&config);
        let mut default = EventCapture::from_config(&SpeedoConfig::DEFAULT);
        strict.on_edge(1000, &shared);
        default.on_edge(1000, &shared);

        // 200 ms passes the default window but not the 250 ms one
        assert_eq!(strict.on_edge(1200, &shared), EdgeOutcome::Bounce);
        assert_eq!(default.on_edge(1200, &shared), EdgeOutcome::Accepted { interval_ms: 200 });
        assert_eq!(strict.on_edge(1250, &shared), EdgeOutcome::Accepted { interval_ms: 250 });
    }
}
