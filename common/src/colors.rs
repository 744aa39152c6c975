//! Color constants for the speed screen.
//!
//! Uses the `RgbColor` trait constants from `embedded-graphics` where one
//! exists, so values are the exact channel maxima of Rgb565 (5/6/5 bits),
//! which is native to the ST7789 and needs no conversion.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Background and field erase color.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Speed values.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Footer text when a fault has been recorded.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Footer text while no fault has been recorded.
pub const GREEN: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Custom Colors
// =============================================================================

/// Orange accent for the average speed value.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for labels and the footer divider.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
