//! Drift-free periodic wake bookkeeping.
//!
//! The estimator sleeps until an absolute deadline instead of "now + period",
//! so jitter in one period never shifts later periods. Deadlines always sit on
//! the grid `start + k * period`.
//!
//! When a wake comes later than the deadline plus a small tolerance, the wake
//! is reported as [`Wake::Late`]. Whole periods that passed meanwhile are
//! skipped: the next deadline is the next grid point after the late wake, so
//! the schedule heals itself without replaying a burst of back-to-back cycles.
//!
//! The timer itself is platform-specific; the firmware does
//!
//! ```ignore
//! Timer::at(Instant::from_millis(schedule.deadline_ms())).await;
//! let wake = schedule.on_wake(Instant::now().as_millis());
//! ```

use crate::config::LATE_TOLERANCE_MS;

/// Outcome of one wake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    /// Woke within tolerance of the deadline.
    OnTime,
    /// Woke `late_by_ms` after the deadline; `missed_periods` grid points were skipped.
    Late { late_by_ms: u64, missed_periods: u32 },
}

impl Wake {
    /// Whether the deadline was missed.
    #[inline]
    pub const fn is_late(&self) -> bool { matches!(self, Self::Late { .. }) }
}

/// Absolute-deadline schedule with a fixed period.
#[derive(Clone, Debug)]
pub struct PeriodicSchedule {
    period_ms: u64,
    tolerance_ms: u64,
    deadline_ms: u64,
}

impl PeriodicSchedule {
    /// Start a schedule whose first deadline is one period after `start_ms`.
    ///
    /// A zero period is raised to 1 ms.
    pub const fn new(
        start_ms: u64,
        period_ms: u64,
    ) -> Self {
        let period_ms = if period_ms == 0 { 1 } else { period_ms };
        Self {
            period_ms,
            tolerance_ms: LATE_TOLERANCE_MS,
            deadline_ms: start_ms + period_ms,
        }
    }

    /// Override the lateness tolerance.
    #[must_use]
    pub const fn with_tolerance(
        mut self,
        tolerance_ms: u64,
    ) -> Self {
        self.tolerance_ms = tolerance_ms;
        self
    }

    /// Next intended wake time.
    #[inline]
    pub const fn deadline_ms(&self) -> u64 { self.deadline_ms }

    /// Record a wake at `now_ms` and advance to the next deadline.
    pub fn on_wake(
        &mut self,
        now_ms: u64,
    ) -> Wake {
        let late_by_ms = now_ms.saturating_sub(self.deadline_ms);
        // Grid points at or before `now_ms` that were never served
        let missed = late_by_ms / self.period_ms;

        self.deadline_ms += self.period_ms * (missed + 1);

        if late_by_ms > self.tolerance_ms {
            Wake::Late {
                late_by_ms,
                missed_periods: missed as u32,
            }
        } else {
            Wake::OnTime
        }
    }
}
