//! Periodic speed estimator task.
//!
//! Sleeps until an absolute deadline so the period does not drift with the
//! time spent rendering. Everything after the wake is non-fatal: lateness and
//! render failures are logged and counted, then the loop carries on.

use defmt::{debug, info, warn};
use embassy_time::{Instant, Timer};
use speedo_common::{CycleReport, SharedMeasurement, SpeedTask, SpeedoConfig, Wake};

use crate::display::PanelScreen;

#[embassy_executor::task]
pub async fn speed_estimator_task(
    shared: &'static SharedMeasurement,
    screen: PanelScreen,
    config: SpeedoConfig,
) {
    let mut task = SpeedTask::new(shared, screen, config, Instant::now().as_millis());
    info!("Speed estimator started, period {} ms", config.period_ms);

    loop {
        Timer::at(Instant::from_millis(task.next_deadline_ms())).await;

        let report = task.on_wake(Instant::now().as_millis());
        log_report(&report);

        if !report.render_ok {
            // Redraw everything once the panel recovers
            task.display_mut().invalidate();
        }
    }
}

fn log_report(report: &CycleReport) {
    if let Wake::Late {
        late_by_ms,
        missed_periods,
    } = report.wake
    {
        warn!("Estimator woke {} ms late, skipped {} period(s)", late_by_ms, missed_periods);
    }

    if !report.render_ok {
        warn!("Speed screen render failed");
    }

    let readout = &report.readout;
    debug!(
        "{=str}: {} km/h (avg {} km/h) at {} s",
        readout.kind.label(),
        readout.instantaneous_kmh(),
        readout.average_kmh(),
        readout.uptime_secs()
    );
}
