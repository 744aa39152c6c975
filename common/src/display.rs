//! Display collaborator contract.
//!
//! The estimator hands one [`SpeedReadout`] per period to a [`SpeedDisplay`].
//! A failing display is reported back as an error value and counted in
//! [`Diagnostics`]; it never stops the measurement loop.

use crate::config::MM_PER_MS_TO_KMH;
use crate::estimator::IntervalKind;

/// Values rendered once per estimator period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedReadout {
    /// Speed from the most recent rotation interval, mm/ms.
    pub instantaneous_speed: f32,
    /// Exponentially smoothed speed, mm/ms.
    pub average_speed: f32,
    /// Time since boot in milliseconds.
    pub uptime_ms: u64,
    /// How this period's interval was classified.
    pub kind: IntervalKind,
}

impl SpeedReadout {
    /// Instantaneous speed in km/h.
    #[inline]
    pub fn instantaneous_kmh(&self) -> f32 { self.instantaneous_speed * MM_PER_MS_TO_KMH }

    /// Average speed in km/h.
    #[inline]
    pub fn average_kmh(&self) -> f32 { self.average_speed * MM_PER_MS_TO_KMH }

    /// Whole seconds since boot.
    #[inline]
    pub const fn uptime_secs(&self) -> u64 { self.uptime_ms / 1000 }
}

/// Non-fatal conditions counted by the estimator task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Estimator periods executed.
    pub cycles: u32,
    /// Wakes that came later than the deadline plus tolerance.
    pub late_wakes: u32,
    /// Whole periods skipped because of late wakes.
    pub missed_periods: u32,
    /// Render calls that returned an error.
    pub render_failures: u32,
}

impl Diagnostics {
    /// Create zeroed counters.
    pub const fn new() -> Self {
        Self {
            cycles: 0,
            late_wakes: 0,
            missed_periods: 0,
            render_failures: 0,
        }
    }

    /// Whether any problem has been recorded since boot.
    #[inline]
    pub const fn has_faults(&self) -> bool { self.late_wakes > 0 || self.render_failures > 0 }
}

/// Anything that can show a [`SpeedReadout`].
///
/// Implementations should return quickly relative to the estimator period;
/// a slow render shows up as late wakes on the following periods.
pub trait SpeedDisplay {
    /// Error reported when rendering fails.
    type Error;

    /// Render the readout and the current diagnostics.
    fn render(
        &mut self,
        readout: &SpeedReadout,
        diagnostics: &Diagnostics,
    ) -> Result<(), Self::Error>;
}

impl<T: SpeedDisplay + ?Sized> SpeedDisplay for &mut T {
    type Error = T::Error;

    fn render(
        &mut self,
        readout: &SpeedReadout,
        diagnostics: &Diagnostics,
    ) -> Result<(), Self::Error> {
        (**self).render(readout, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readout(speed: f32) -> SpeedReadout {
        SpeedReadout {
            instantaneous_speed: speed,
            average_speed: speed / 2.0,
            uptime_ms: 61_500,
            kind: IntervalKind::Fresh,
        }
    }

    #[test]
    fn test_kmh_conversion() {
        let r = readout(5.0);
        assert!((r.instantaneous_kmh() - 18.0).abs() < 0.001);
        assert!((r.average_kmh() - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_uptime_secs_truncates() {
        assert_eq!(readout(0.0).uptime_secs(), 61);
    }

    #[test]
    fn test_diagnostics_faults() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_faults());

        diagnostics.cycles = 10;
        assert!(!diagnostics.has_faults());

        diagnostics.render_failures = 1;
        assert!(diagnostics.has_faults());
    }
}
