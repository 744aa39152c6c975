//! Bicycle Speedometer Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows wheel speed on the Pimoroni PIM715 Display Pack 2.8".
//!
//! # Architecture
//!
//! Two executors share one [`SharedMeasurement`]:
//! - Interrupt executor (`SWI_IRQ_1`): rotation sensor task. Debounces edges
//!   and publishes the latest inter-rotation interval.
//! - Thread executor: speed estimator task. Consumes the interval once per
//!   period, updates speed and average, redraws the screen.

#![no_std]
#![no_main]
#![allow(clippy::cast_possible_truncation)]

mod display;
mod tasks;

use cortex_m_rt::entry;
use defmt::info;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::spi::Spi;
use speedo_common::{SharedMeasurement, SpeedoConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::display::{init_screen, panel_spi_config};
use crate::tasks::{rotation_sensor_task, speed_estimator_task};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-speedo"),
    embassy_rp::binary_info::rp_program_description!(c"Bicycle speedometer on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

// =============================================================================
// Executors and Shared State
// =============================================================================

/// Runs the sensor task in interrupt context.
static EXECUTOR_SENSOR: InterruptExecutor = InterruptExecutor::new();

/// Thread-mode executor for the estimator.
static EXECUTOR_MAIN: StaticCell<Executor> = StaticCell::new();

/// Latest interval, handed to both tasks by reference.
static MEASUREMENT: StaticCell<SharedMeasurement> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: only this handler drives the sensor executor
    unsafe { EXECUTOR_SENSOR.on_interrupt() }
}

#[entry]
fn main() -> ! {
    info!("Bicycle speedometer starting...");

    let p = embassy_rp::init(Default::default());
    let shared: &'static SharedMeasurement = MEASUREMENT.init(SharedMeasurement::new());
    let config = SpeedoConfig::DEFAULT;

    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);

    // TX-only SPI, the display has no MISO
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, panel_spi_config());
    let screen = init_screen(spi, cs, dc);
    info!("Display initialized");

    // Reed switch to ground, closes once per wheel rotation
    let sensor = Input::new(p.PIN_22, Pull::Up);

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let sensor_spawner = EXECUTOR_SENSOR.start(interrupt::SWI_IRQ_1);
    sensor_spawner.spawn(rotation_sensor_task(sensor, shared, config)).unwrap();
    info!("Rotation sensor task spawned");

    let executor = EXECUTOR_MAIN.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(speed_estimator_task(shared, screen, config)).unwrap();
        info!("Speed estimator task spawned");
    })
}
