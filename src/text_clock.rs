//! # Digital Clock Text Rendering
//!
//! Rasterizes time, date and alarm strings onto tightly-cropped bitmaps
//! sized to the text's own metrics. The host surface scales nothing: a
//! bitmap is exactly as wide as its measured text, so the formulas here
//! are the single source of layout truth.
//!
//! The shadow is a dark halo drawn as offset passes under the main text,
//! one pass per compass direction, which reads like a small blur on the
//! low-resolution targets these widgets ship to.

use chrono::NaiveDateTime;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::bitmap::{Argb, WidgetBitmap};
use crate::formats::{self, Skeleton};
use crate::typeface::Typeface;
use crate::RenderStyle;

/// Halo pass offsets around the shadow anchor.
const SHADOW_RING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// AM/PM suffix renders at one third of the primary size.
const MERIDIEM_SCALE: u32 = 3;

/// Draw one left-aligned glyph run with the baseline at `baseline_left`.
///
/// `shadow` is the halo anchor offset (`(0, 0)` for the clock, `(0, 2)`
/// for the weather footer); `None` disables the halo.
pub(crate) fn draw_text_run<D>(
    target: &mut D,
    text: &str,
    baseline_left: Point,
    face: &Typeface,
    color: Argb,
    shadow: Option<Point>,
    letter_spacing: Option<f32>,
) where
    D: DrawTarget<Color = Argb>,
{
    if let Some(anchor) = shadow {
        for (dx, dy) in SHADOW_RING {
            let origin = baseline_left + anchor + Point::new(dx, dy);
            text_pass(target, text, origin, face, Argb::BLACK, letter_spacing);
        }
    }
    text_pass(target, text, baseline_left, face, color, letter_spacing);
}

/// Single pass of glyphs, placed one character at a time so letter spacing
/// stays under our control.
fn text_pass<D>(
    target: &mut D,
    text: &str,
    origin: Point,
    face: &Typeface,
    color: Argb,
    letter_spacing: Option<f32>,
) where
    D: DrawTarget<Color = Argb>,
{
    let style = MonoTextStyle::new(face.font(), color);
    let advance = face.char_width() as i32 + face.char_gap(letter_spacing);
    let mut x = origin.x;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let glyph = ch.encode_utf8(&mut buf);
        Text::with_baseline(glyph, Point::new(x, origin.y), style, Baseline::Alphabetic)
            .draw(target)
            .ok();
        x += advance;
    }
}

/// Render a standalone string (date lines, labels) to a cropped bitmap.
///
/// Width is the measured text width, height the resolved text size; the
/// baseline sits at `height/2 + (span/2 − descent)` so the run is visually
/// centered regardless of the font's metrics. Empty text yields a
/// zero-width bitmap; avoiding that is the caller's job.
pub fn render_text(text: &str, style: &RenderStyle) -> WidgetBitmap {
    let face = style.typeface;
    let width = face.measure(text, style.letter_spacing);
    let mut bitmap = WidgetBitmap::new(width, face.line_height());
    let baseline = face.centered_baseline(face.line_height());
    draw_text_run(
        &mut bitmap,
        text,
        Point::new(0, baseline),
        &face,
        style.color,
        style.shadow.then(Point::zero),
        style.letter_spacing,
    );
    bitmap
}

/// Render the current time with an optional reduced-size AM/PM suffix.
///
/// With `show_am_pm` the meridiem field is stripped from the pattern and
/// the designator renders separately after the primary run, at one third
/// the primary size, vertically centered on its own metrics.
pub fn render_time(
    pattern: &str,
    style: &RenderStyle,
    show_am_pm: bool,
    now: NaiveDateTime,
) -> WidgetBitmap {
    let pattern = if show_am_pm {
        formats::strip_meridiem(pattern)
    } else {
        pattern.to_string()
    };
    let time_text = now.format(&pattern).to_string();
    let face = style.typeface;
    let suffix_face = face.scaled((style.text_size_px / MERIDIEM_SCALE).max(1));
    let suffix_text = if show_am_pm {
        formats::meridiem(now)
    } else {
        String::new()
    };

    let time_width = face.measure(&time_text, style.letter_spacing);
    let suffix_width = suffix_face.measure(&suffix_text, style.letter_spacing);
    let height = face.line_height();
    let mut bitmap = WidgetBitmap::new(time_width + suffix_width, height);

    let shadow = style.shadow.then(Point::zero);
    draw_text_run(
        &mut bitmap,
        &time_text,
        Point::new(0, face.centered_baseline(height)),
        &face,
        style.color,
        shadow,
        style.letter_spacing,
    );
    if show_am_pm {
        draw_text_run(
            &mut bitmap,
            &suffix_text,
            Point::new(time_width as i32, suffix_face.centered_baseline(height)),
            &suffix_face,
            style.color,
            shadow,
            style.letter_spacing,
        );
    }
    bitmap
}

/// Render the date/alarm status row shown under the digital clock.
///
/// The row composes an uppercased current date and, when a next alarm is
/// known, a tinted alarm glyph followed by the formatted trigger time.
/// Widths come from measured text plus separator padding. Returns `None`
/// when nothing would be drawn.
pub fn render_status_row(
    style: &RenderStyle,
    show_date: bool,
    show_alarm: bool,
    next_alarm: Option<NaiveDateTime>,
    now: NaiveDateTime,
    use_24h: bool,
) -> Option<WidgetBitmap> {
    let face = style.typeface;
    let alarm_text = next_alarm
        .filter(|_| show_alarm)
        .map(|alarm| formats::format_alarm(alarm, use_24h).to_uppercase());

    // A visible alarm shortens the date so both fit on one row
    let date_skeleton = if alarm_text.is_some() {
        Skeleton::AbbrevWeekdayMonthDay
    } else {
        Skeleton::FullWeekdayMonthDay
    };
    let date_text = show_date
        .then(|| now.format(formats::best_pattern(date_skeleton)).to_string().to_uppercase());

    let separator = face.measure(" ", style.letter_spacing);
    // Glyph is recolored to the text color, keeping its own alpha
    let glyph = alarm_glyph(face.line_height()).tinted(style.color);

    let date_width = date_text
        .as_ref()
        .map(|t| face.measure(t, style.letter_spacing) + 2 * separator)
        .unwrap_or(0);
    let alarm_width = alarm_text
        .as_ref()
        .map(|t| face.measure(t, style.letter_spacing) + 3 * separator + glyph.width())
        .unwrap_or(0);

    let total_width = date_width + alarm_width;
    let total_height = glyph.height().max(face.line_height());
    if total_width == 0 || total_height == 0 {
        return None;
    }

    let mut bitmap = WidgetBitmap::new(total_width, total_height);
    let shadow = style.shadow.then(Point::zero);
    let baseline = face.centered_baseline(total_height);

    if let Some(text) = &date_text {
        let text_width = face.measure(text, style.letter_spacing);
        draw_text_run(
            &mut bitmap,
            text,
            Point::new((date_width - text_width) as i32 / 2, baseline),
            &face,
            style.color,
            shadow,
            style.letter_spacing,
        );
    }
    if let Some(text) = &alarm_text {
        bitmap.blit(&glyph, Point::new((date_width + separator) as i32, 0));
        let text_width = face.measure(text, style.letter_spacing);
        let center_x = (date_width + 2 * separator + alarm_width / 2) as i32;
        draw_text_run(
            &mut bitmap,
            text,
            Point::new(center_x - text_width as i32 / 2, baseline),
            &face,
            style.color,
            shadow,
            style.letter_spacing,
        );
    }
    Some(bitmap)
}

/// Small procedural alarm-clock glyph: a stroked body with bell ticks and
/// stub hands, scaled to the row height.
///
/// Stands in for an icon-pack drawable. Drawn white; the caller tints it
/// to the widget text color.
fn alarm_glyph(size: u32) -> WidgetBitmap {
    use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};

    let mut bitmap = WidgetBitmap::new(size, size);
    if size < 6 {
        return bitmap;
    }
    let stroke = PrimitiveStyle::with_stroke(Argb::WHITE, (size / 12).max(1));
    let center = Point::new(size as i32 / 2, size as i32 / 2 + size as i32 / 12);
    let body = size * 3 / 4;

    Circle::with_center(center, body)
        .into_styled(stroke)
        .draw(&mut bitmap)
        .ok();
    // Bell ticks at the shoulders
    let r = body as i32 / 2;
    Line::new(
        center + Point::new(-r, -r),
        center + Point::new(-r + r / 2, -r - r / 2),
    )
    .into_styled(stroke)
    .draw(&mut bitmap)
    .ok();
    Line::new(
        center + Point::new(r, -r),
        center + Point::new(r - r / 2, -r - r / 2),
    )
    .into_styled(stroke)
    .draw(&mut bitmap)
    .ok();
    // Hands at ten past ten
    Line::new(center, center + Point::new(0, -r + 1))
        .into_styled(stroke)
        .draw(&mut bitmap)
        .ok();
    Line::new(center, center + Point::new(r / 2, 0))
        .into_styled(stroke)
        .draw(&mut bitmap)
        .ok();
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn style() -> RenderStyle {
        RenderStyle {
            typeface: Typeface::load("mono", 20).unwrap(),
            text_size_px: 20,
            color: Argb::WHITE,
            shadow: false,
            letter_spacing: None,
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn text_bitmap_matches_measured_width() {
        let style = style();
        let bitmap = render_text("10:30", &style);
        assert_eq!(bitmap.width(), style.typeface.measure("10:30", None));
        assert_eq!(bitmap.height(), style.typeface.line_height());
        assert!(bitmap.opaque_pixels() > 0);
    }

    #[test]
    fn empty_text_yields_zero_width() {
        let bitmap = render_text("", &style());
        assert_eq!(bitmap.width(), 0);
        assert!(bitmap.is_empty());
    }

    #[test]
    fn time_bitmap_width_includes_suffix() {
        let style = style();
        let now = at(15, 30);
        let with_suffix = render_time("%-I:%M %p", &style, true, now);
        let suffix_face = style.typeface.scaled(style.text_size_px / 3);
        let expected =
            style.typeface.measure("3:30", None) + suffix_face.measure("PM", None);
        assert_eq!(with_suffix.width(), expected);

        let plain = render_time("%H:%M", &style, false, now);
        assert_eq!(plain.width(), style.typeface.measure("15:30", None));
    }

    #[test]
    fn rendering_is_idempotent() {
        let style = style();
        let now = at(9, 41);
        let a = render_time("%-I:%M %p", &style, true, now);
        let b = render_time("%-I:%M %p", &style, true, now);
        assert_eq!(a, b);
    }

    #[test]
    fn letter_spacing_changes_width_only_when_set() {
        let mut style = style();
        let plain = render_text("WED", &style);
        style.letter_spacing = Some(0.5);
        let tracked = render_text("WED", &style);
        assert!(tracked.width() > plain.width());
    }

    #[test]
    fn shadow_adds_dark_pixels() {
        let mut style = style();
        style.shadow = true;
        let bitmap = render_text("8", &style);
        let black = bitmap
            .pixels()
            .iter()
            .filter(|p| **p == Argb::BLACK)
            .count();
        assert!(black > 0, "halo passes should leave black pixels");
    }

    #[test]
    fn status_row_empty_when_everything_hidden() {
        let row = render_status_row(&style(), false, false, None, at(8, 0), true);
        assert!(row.is_none());
    }

    #[test]
    fn status_row_with_alarm_is_wider_than_date_alone() {
        let style = style();
        let now = at(8, 0);
        let date_only = render_status_row(&style, true, false, None, now, true).unwrap();
        let both =
            render_status_row(&style, true, true, Some(at(9, 30)), now, true).unwrap();
        assert!(both.width() > date_only.width());
        assert!(both.opaque_pixels() > 0);
    }

    #[test]
    fn status_row_skips_alarm_without_trigger_time() {
        let style = style();
        let row = render_status_row(&style, false, true, None, at(8, 0), true);
        assert!(row.is_none());
    }
}
