//! One estimator period, independent of the executor.
//!
//! [`SpeedTask`] owns everything the periodic task needs: the estimator, the
//! schedule, the display and the diagnostics counters. The firmware loop only
//! has to sleep until [`SpeedTask::next_deadline_ms`] and call
//! [`SpeedTask::on_wake`]:
//!
//! ```ignore
//! loop {
//!     Timer::at(Instant::from_millis(task.next_deadline_ms())).await;
//!     let report = task.on_wake(Instant::now().as_millis());
//!     // log report
//! }
//! ```
//!
//! Nothing in a cycle is fatal. Late wakes and render failures are counted in
//! [`Diagnostics`] and returned in the [`CycleReport`] for logging.

use crate::config::SpeedoConfig;
use crate::display::{Diagnostics, SpeedDisplay, SpeedReadout};
use crate::estimator::SpeedEstimator;
use crate::measurement::SharedMeasurement;
use crate::schedule::{PeriodicSchedule, Wake};

/// What happened during one period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleReport {
    /// Values handed to the display.
    pub readout: SpeedReadout,
    /// Whether the wake met its deadline.
    pub wake: Wake,
    /// Whether the display accepted the readout.
    pub render_ok: bool,
}

/// The periodic speed estimation task.
pub struct SpeedTask<'a, D: SpeedDisplay> {
    shared: &'a SharedMeasurement,
    estimator: SpeedEstimator,
    schedule: PeriodicSchedule,
    display: D,
    diagnostics: Diagnostics,
}

impl<'a, D: SpeedDisplay> SpeedTask<'a, D> {
    /// Create the task; the first deadline is one period after `start_ms`.
    pub fn new(
        shared: &'a SharedMeasurement,
        display: D,
        config: SpeedoConfig,
        start_ms: u64,
    ) -> Self {
        Self {
            shared,
            estimator: SpeedEstimator::new(config),
            schedule: PeriodicSchedule::new(start_ms, config.period_ms),
            display,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Absolute time of the next wake.
    #[inline]
    pub const fn next_deadline_ms(&self) -> u64 { self.schedule.deadline_ms() }

    /// Counters accumulated since start.
    #[inline]
    pub const fn diagnostics(&self) -> &Diagnostics { &self.diagnostics }

    /// Display collaborator.
    #[inline]
    pub fn display_mut(&mut self) -> &mut D { &mut self.display }

    /// Run one period at `now_ms` (time since boot).
    pub fn on_wake(
        &mut self,
        now_ms: u64,
    ) -> CycleReport {
        let wake = self.schedule.on_wake(now_ms);
        if let Wake::Late { missed_periods, .. } = wake {
            self.diagnostics.late_wakes = self.diagnostics.late_wakes.saturating_add(1);
            self.diagnostics.missed_periods = self.diagnostics.missed_periods.saturating_add(missed_periods);
        }

        let readout = self.estimator.cycle(self.shared, now_ms);
        self.diagnostics.cycles = self.diagnostics.cycles.wrapping_add(1);

        let render_ok = self.display.render(&readout, &self.diagnostics).is_ok();
        if !render_ok {
            self.diagnostics.render_failures = self.diagnostics.render_failures.saturating_add(1);
        }

        CycleReport {
            readout,
            wake,
            render_ok,
        }
    }
}
