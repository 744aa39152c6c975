//! Speed screen rendered with `embedded-graphics`.
//!
//! [`SpeedScreen`] implements [`SpeedDisplay`] for any `Rgb565` draw target,
//! so the firmware can hand it the ST7789 driver and the tests an in-memory
//! target.
//!
//! # Layout (320x240)
//!
//! ```text
//! +--------------------------------------+
//! |              SPEED km/h              |
//! |                 18.0                 |
//! |                                      |
//! |     AVG km/h          RIDE TIME      |
//! |       16.4            00:12:31       |
//! |--------------------------------------|
//! | LATE 0  ERR 0                  fresh |
//! +--------------------------------------+
//! ```
//!
//! # Update Strategy
//!
//! | Element | Strategy |
//! |---------|----------|
//! | Labels, divider | Drawn once on the first successful frame |
//! | Speed / average | Redrawn when the value changes at 0.1 km/h resolution |
//! | Ride time | Redrawn when the second changes |
//! | Footer | Redrawn when a counter or the period classification changes |
//!
//! A field's remembered value is only updated after it was drawn
//! successfully, so a failed frame is fully retried on the next period.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;
#[cfg(not(test))]
use micromath::F32Ext;

use crate::colors::BLACK;
use crate::config::{CENTER_X, FOOTER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::{Diagnostics, SpeedDisplay, SpeedReadout};
use crate::estimator::IntervalKind;
use crate::styles::{
    AVERAGE_STYLE,
    CENTERED,
    DIVIDER_STYLE,
    ERASE_STYLE,
    FOOTER_STYLE_FAULT,
    FOOTER_STYLE_OK,
    LABEL_STYLE,
    LEFT_ALIGNED,
    RIGHT_ALIGNED,
    SPEED_STYLE,
    UPTIME_STYLE,
};

// =============================================================================
// Layout
// =============================================================================

const LEFT_CENTER_X: i32 = (SCREEN_WIDTH / 4) as i32;
const RIGHT_CENTER_X: i32 = (SCREEN_WIDTH * 3 / 4) as i32;
const FOOTER_TOP: i32 = (SCREEN_HEIGHT - FOOTER_HEIGHT) as i32;

const SPEED_LABEL_POS: Point = Point::new(CENTER_X, 24);
const SPEED_VALUE_POS: Point = Point::new(CENTER_X, 72);
const SPEED_FIELD: Rectangle = Rectangle::new(Point::new(0, 36), Size::new(SCREEN_WIDTH, 46));

const AVERAGE_LABEL_POS: Point = Point::new(LEFT_CENTER_X, 112);
const AVERAGE_VALUE_POS: Point = Point::new(LEFT_CENTER_X, 146);
const AVERAGE_FIELD: Rectangle = Rectangle::new(Point::new(0, 120), Size::new(SCREEN_WIDTH / 2, 34));

const UPTIME_LABEL_POS: Point = Point::new(RIGHT_CENTER_X, 112);
const UPTIME_VALUE_POS: Point = Point::new(RIGHT_CENTER_X, 146);
const UPTIME_FIELD: Rectangle = Rectangle::new(Point::new((SCREEN_WIDTH / 2) as i32, 120), Size::new(SCREEN_WIDTH / 2, 34));

const DIVIDER_START: Point = Point::new(0, FOOTER_TOP);
const DIVIDER_END: Point = Point::new((SCREEN_WIDTH - 1) as i32, FOOTER_TOP);
const FOOTER_FIELD: Rectangle = Rectangle::new(Point::new(0, FOOTER_TOP + 1), Size::new(SCREEN_WIDTH, FOOTER_HEIGHT - 1));
const FOOTER_LEFT_POS: Point = Point::new(4, FOOTER_TOP + 14);
const FOOTER_RIGHT_POS: Point = Point::new((SCREEN_WIDTH - 4) as i32, FOOTER_TOP + 14);

// =============================================================================
// Formatting
// =============================================================================

/// Round a speed to tenths so the dirty check matches what gets displayed.
#[inline]
fn to_tenths(kmh: f32) -> i32 { (kmh * 10.0).round() as i32 }

/// Format a tenths value as `"12.3"`.
fn format_tenths(tenths: i32) -> String<12> {
    let mut out: String<12> = String::new();
    let _ = write!(out, "{}.{}", tenths / 10, (tenths % 10).abs());
    out
}

/// Format seconds since boot as `HH:MM:SS` (hours grow past 99 if needed).
pub fn format_uptime(uptime_secs: u64) -> String<12> {
    let hours = uptime_secs / 3600;
    let minutes = (uptime_secs / 60) % 60;
    let seconds = uptime_secs % 60;

    let mut out: String<12> = String::new();
    let _ = write!(out, "{hours:02}:{minutes:02}:{seconds:02}");
    out
}

// =============================================================================
// Screen State Tracking
// =============================================================================

/// Last successfully drawn value of every field.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScreenState {
    /// Whether the static frame (clear, labels, divider) still has to be drawn.
    first_frame: bool,
    speed_tenths: Option<i32>,
    average_tenths: Option<i32>,
    uptime_secs: Option<u64>,
    footer: Option<(u32, u32, IntervalKind)>,
}

impl ScreenState {
    /// Create a state that forces a full redraw.
    const fn new() -> Self {
        Self {
            first_frame: true,
            speed_tenths: None,
            average_tenths: None,
            uptime_secs: None,
            footer: None,
        }
    }

    /// Forget everything drawn so far (e.g. after the panel was reset).
    fn invalidate(&mut self) { *self = Self::new(); }
}

// =============================================================================
// Speed Screen
// =============================================================================

/// Speed readout screen on top of an `Rgb565` draw target.
pub struct SpeedScreen<D> {
    target: D,
    state: ScreenState,
}

impl<D> SpeedScreen<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target. Nothing is drawn until the first render.
    pub const fn new(target: D) -> Self {
        Self {
            target,
            state: ScreenState::new(),
        }
    }

    /// Force a full redraw on the next render.
    pub fn invalidate(&mut self) { self.state.invalidate(); }

    fn draw_frame(&mut self) -> Result<(), D::Error> {
        self.target.clear(BLACK)?;

        Text::with_text_style("SPEED km/h", SPEED_LABEL_POS, LABEL_STYLE, CENTERED).draw(&mut self.target)?;
        Text::with_text_style("AVG km/h", AVERAGE_LABEL_POS, LABEL_STYLE, CENTERED).draw(&mut self.target)?;
        Text::with_text_style("RIDE TIME", UPTIME_LABEL_POS, LABEL_STYLE, CENTERED).draw(&mut self.target)?;
        Line::new(DIVIDER_START, DIVIDER_END)
            .into_styled(DIVIDER_STYLE)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_speed(
        &mut self,
        tenths: i32,
    ) -> Result<(), D::Error> {
        SPEED_FIELD.into_styled(ERASE_STYLE).draw(&mut self.target)?;
        Text::with_text_style(&format_tenths(tenths), SPEED_VALUE_POS, SPEED_STYLE, CENTERED).draw(&mut self.target)?;
        Ok(())
    }

    fn draw_average(
        &mut self,
        tenths: i32,
    ) -> Result<(), D::Error> {
        AVERAGE_FIELD.into_styled(ERASE_STYLE).draw(&mut self.target)?;
        Text::with_text_style(&format_tenths(tenths), AVERAGE_VALUE_POS, AVERAGE_STYLE, CENTERED)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_uptime(
        &mut self,
        uptime_secs: u64,
    ) -> Result<(), D::Error> {
        UPTIME_FIELD.into_styled(ERASE_STYLE).draw(&mut self.target)?;
        Text::with_text_style(&format_uptime(uptime_secs), UPTIME_VALUE_POS, UPTIME_STYLE, CENTERED)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_footer(
        &mut self,
        diagnostics: &Diagnostics,
        kind: IntervalKind,
    ) -> Result<(), D::Error> {
        let style = if diagnostics.has_faults() { FOOTER_STYLE_FAULT } else { FOOTER_STYLE_OK };

        let mut counters: String<32> = String::new();
        let _ = write!(counters, "LATE {}  ERR {}", diagnostics.late_wakes, diagnostics.render_failures);

        FOOTER_FIELD.into_styled(ERASE_STYLE).draw(&mut self.target)?;
        Text::with_text_style(&counters, FOOTER_LEFT_POS, style, LEFT_ALIGNED).draw(&mut self.target)?;
        Text::with_text_style(kind.label(), FOOTER_RIGHT_POS, LABEL_STYLE, RIGHT_ALIGNED).draw(&mut self.target)?;
        Ok(())
    }
}

impl<D> SpeedDisplay for SpeedScreen<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn render(
        &mut self,
        readout: &SpeedReadout,
        diagnostics: &Diagnostics,
    ) -> Result<(), Self::Error> {
        if self.state.first_frame {
            self.draw_frame()?;
            self.state.first_frame = false;
        }

        let speed = to_tenths(readout.instantaneous_kmh());
        if self.state.speed_tenths != Some(speed) {
            self.draw_speed(speed)?;
            self.state.speed_tenths = Some(speed);
        }

        let average = to_tenths(readout.average_kmh());
        if self.state.average_tenths != Some(average) {
            self.draw_average(average)?;
            self.state.average_tenths = Some(average);
        }

        let uptime = readout.uptime_secs();
        if self.state.uptime_secs != Some(uptime) {
            self.draw_uptime(uptime)?;
            self.state.uptime_secs = Some(uptime);
        }

        let footer = (diagnostics.late_wakes, diagnostics.render_failures, readout.kind);
        if self.state.footer != Some(footer) {
            self.draw_footer(diagnostics, readout.kind)?;
            self.state.footer = Some(footer);
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::Pixel;

    #[derive(Debug, PartialEq)]
    struct DrawFailed;

    /// In-memory target that counts pixels and can be told to fail.
    struct CountingTarget {
        pixels: usize,
        fail: bool,
    }

    impl CountingTarget {
        fn new() -> Self { Self { pixels: 0, fail: false } }
    }

    impl OriginDimensions for CountingTarget {
        fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
    }

    impl DrawTarget for CountingTarget {
        type Color = Rgb565;
        type Error = DrawFailed;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            if self.fail {
                return Err(DrawFailed);
            }
            self.pixels += pixels.into_iter().count();
            Ok(())
        }
    }

    fn readout(
        speed: f32,
        uptime_ms: u64,
    ) -> SpeedReadout {
        SpeedReadout {
            instantaneous_speed: speed,
            average_speed: speed,
            uptime_ms,
            kind: IntervalKind::Fresh,
        }
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0).as_str(), "00:00:00");
        assert_eq!(format_uptime(751).as_str(), "00:12:31");
        assert_eq!(format_uptime(3600 * 5 + 61).as_str(), "05:01:01");
        assert_eq!(format_uptime(3600 * 123).as_str(), "123:00:00");
    }

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_tenths(180).as_str(), "18.0");
        assert_eq!(format_tenths(5).as_str(), "0.5");
        assert_eq!(format_tenths(0).as_str(), "0.0");
    }

    #[test]
    fn test_to_tenths_rounds() {
        // 1953 / 391 * 3.6 = 17.98 km/h
        assert_eq!(to_tenths(17.98), 180);
        assert_eq!(to_tenths(17.94), 179);
    }

    #[test]
    fn test_first_render_draws_everything() {
        let mut screen = SpeedScreen::new(CountingTarget::new());
        assert!(screen.state.first_frame);

        screen.render(&readout(5.0, 1000), &Diagnostics::new()).unwrap();

        assert!(!screen.state.first_frame);
        // At least the full-screen clear
        assert!(screen.target.pixels >= (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
    }

    #[test]
    fn test_unchanged_readout_draws_nothing() {
        let mut screen = SpeedScreen::new(CountingTarget::new());
        let diagnostics = Diagnostics::new();
        screen.render(&readout(5.0, 1000), &diagnostics).unwrap();

        screen.target.pixels = 0;
        // Same tenths, same second
        screen.render(&readout(5.001, 1400), &diagnostics).unwrap();
        assert_eq!(screen.target.pixels, 0);
    }

    #[test]
    fn test_changed_field_redraws_only_that_field() {
        let mut screen = SpeedScreen::new(CountingTarget::new());
        let diagnostics = Diagnostics::new();
        screen.render(&readout(5.0, 1000), &diagnostics).unwrap();

        screen.target.pixels = 0;
        screen.render(&readout(5.0, 2000), &diagnostics).unwrap();
        let uptime_pixels = screen.target.pixels;

        // Uptime field erase plus glyphs, far less than a full clear
        assert!(uptime_pixels >= UPTIME_FIELD.size.width as usize * UPTIME_FIELD.size.height as usize);
        assert!(uptime_pixels < (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
    }

    #[test]
    fn test_draw_error_propagates_and_retries() {
        let mut screen = SpeedScreen::new(CountingTarget::new());
        screen.target.fail = true;

        let result = screen.render(&readout(5.0, 1000), &Diagnostics::new());
        assert_eq!(result, Err(DrawFailed));
        assert!(screen.state.first_frame);

        // Display recovers: the whole frame is drawn on the next render
        screen.target.fail = false;
        screen.render(&readout(5.0, 1000), &Diagnostics::new()).unwrap();
        assert!(!screen.state.first_frame);
        assert!(screen.target.pixels >= (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
    }

    #[test]
    fn test_footer_redraws_on_new_fault() {
        let mut screen = SpeedScreen::new(CountingTarget::new());
        let mut diagnostics = Diagnostics::new();
        screen.render(&readout(5.0, 1000), &diagnostics).unwrap();

        screen.target.pixels = 0;
        diagnostics.late_wakes = 1;
        screen.render(&readout(5.0, 1000), &diagnostics).unwrap();
        assert!(screen.target.pixels > 0);
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let mut screen = SpeedScreen::new(CountingTarget::new());
        screen.render(&readout(5.0, 1000), &Diagnostics::new()).unwrap();

        screen.invalidate();
        assert!(screen.state.first_frame);
        screen.target.pixels = 0;
        screen.render(&readout(5.0, 1000), &Diagnostics::new()).unwrap();
        assert!(screen.target.pixels >= (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
    }
}
