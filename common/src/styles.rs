//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are `const` so they live in read-only data
//! and are never rebuilt per frame.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Alignment, TextStyle, TextStyleBuilder};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BLACK, GRAY, GREEN, ORANGE, RED, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Used for labels and values.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for the diagnostics footer.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned text. Used for the period classification in the footer.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Text Styles
// =============================================================================

/// Small gray text for field labels.
pub const LABEL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);

/// Large white text for the current speed (`ProFont` 24pt).
pub const SPEED_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// Medium orange text for the average speed (`ProFont` 18pt).
pub const AVERAGE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, ORANGE);

/// Medium white text for the uptime clock (`ProFont` 18pt).
pub const UPTIME_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);

/// Footer text while healthy.
pub const FOOTER_STYLE_OK: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GREEN);

/// Footer text after a late wake or render failure.
pub const FOOTER_STYLE_FAULT: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, RED);

// =============================================================================
// Primitive Styles
// =============================================================================

/// Fill used to erase a field before redrawing it.
pub const ERASE_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

/// Stroke for the footer divider.
pub const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);
