//! Rotation sensor task.
//!
//! Spawned on the `SWI_IRQ_1` interrupt executor so it preempts the
//! estimator as soon as the GPIO edge wakes it. The body must stay short: it
//! stamps the edge, runs the debounce filter and publishes. No logging here.

use embassy_rp::gpio::Input;
use embassy_time::Instant;
use speedo_common::{EventCapture, SharedMeasurement, SpeedoConfig};

#[embassy_executor::task]
pub async fn rotation_sensor_task(
    mut sensor: Input<'static>,
    shared: &'static SharedMeasurement,
    config: SpeedoConfig,
) {
    let mut capture = EventCapture::from_config(&config);

    loop {
        sensor.wait_for_rising_edge().await;
        // Truncation is fine: capture uses wrapping arithmetic
        let now_ms = Instant::now().as_millis() as u32;
        capture.on_edge(now_ms, shared);
    }
}
