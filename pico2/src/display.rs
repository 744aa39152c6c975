//! ST7789 panel of the Pimoroni PIM715 Display Pack 2.8", wrapped in the
//! speed screen.
//!
//! | Signal | GPIO |
//! |--------|------|
//! | CS | 17 |
//! | DC | 16 |
//! | SCK (SPI0) | 18 |
//! | MOSI (SPI0) | 19 |
//! | Backlight | 20 |
//!
//! The panel reset line is wired to RUN.

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::{Builder, NoResetPin};
use speedo_common::SpeedScreen;

/// SPI0 clock for the panel.
const SPI_FREQUENCY_HZ: u32 = 20_000_000;

type PanelSpi = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>;

/// The PIM715 panel driver.
pub type Pim715Display = mipidsi::Display<SPIInterface<PanelSpi, Output<'static>>, ST7789, NoResetPin>;

/// Speed screen drawing straight to the panel.
pub type PanelScreen = SpeedScreen<Pim715Display>;

/// SPI0 settings for [`init_screen`].
pub fn panel_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = SPI_FREQUENCY_HZ;
    config
}

/// Bring up the panel in landscape (320x240) and hand it to a fresh speed
/// screen. Nothing is drawn until the first render.
pub fn init_screen(
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
) -> PanelScreen {
    let device = ExclusiveDevice::new_no_delay(spi, cs).expect("panel chip select");

    // Panel is 240x320 native
    let panel = Builder::new(ST7789, SPIInterface::new(device, dc))
        .display_size(240, 320)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut embassy_time::Delay)
        .expect("ST7789 init");

    SpeedScreen::new(panel)
}
