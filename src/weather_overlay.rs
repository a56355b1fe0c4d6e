//! # Weather Overlay Rendering
//!
//! Composites a condition icon with a temperature footer into the small
//! per-day bitmaps the weather widget shows, and lays those cells out into
//! the multi-day forecast strip. Icons arrive as plain ARGB bitmaps from
//! the icon-pack collaborator and are never scaled; the cell adapts to the
//! icon's intrinsic size.

use chrono::{Days, NaiveDate};
use embedded_graphics::prelude::*;

use crate::bitmap::{Argb, WidgetBitmap};
use crate::formats::{self, Skeleton};
use crate::text_clock::draw_text_run;
use crate::typeface::Typeface;
use crate::ForecastEntry;

/// Footer band under the icon; 18 dp at the 2x density these widgets
/// target.
pub const FOOTER_HEIGHT: u32 = 36;
/// Footer text size, 14 sp at the same density.
const FOOTER_TEXT_SIZE: u32 = 28;
/// Footer text drops a slightly offset shadow to stay legible on bright
/// wallpapers.
const FOOTER_SHADOW_OFFSET: Point = Point::new(0, 2);
const FOOTER_COLOR: Argb = Argb::WHITE;
/// Horizontal gap between forecast strip cells.
const CELL_SPACING: u32 = 8;

/// Footer string: `"low/high<unit>"`, or `"low<unit>"` with no high.
pub fn footer_text(low: &str, high: Option<&str>, units: &str) -> String {
    match high {
        Some(high) => format!("{low}/{high}{units}"),
        None => format!("{low}{units}"),
    }
}

/// Composite one condition icon over a temperature footer.
///
/// The canvas is exactly the icon's width; its height is the icon plus the
/// footer band. The footer centers on measured text bounds and anchors
/// near the bottom of the band.
pub fn render_overlay(
    icon: &WidgetBitmap,
    low: &str,
    high: Option<&str>,
    units: &str,
) -> WidgetBitmap {
    let width = icon.width();
    let height = icon.height() + FOOTER_HEIGHT;
    let mut bitmap = WidgetBitmap::new(width, height);
    bitmap.blit(icon, Point::zero());

    let face = Typeface::default_for_size(FOOTER_TEXT_SIZE);
    let text = footer_text(low, high, units);
    let text_width = face.measure(&text, None);
    let origin = Point::new(
        width as i32 / 2 - text_width as i32 / 2,
        (height - FOOTER_TEXT_SIZE / 2) as i32,
    );
    draw_text_run(
        &mut bitmap,
        &text,
        origin,
        &face,
        FOOTER_COLOR,
        Some(FOOTER_SHADOW_OFFSET),
        None,
    );
    bitmap
}

/// Lay out per-day overlay cells into one horizontal strip.
///
/// Each cell is an overlay (icon plus footer) with a short weekday caption
/// centered beneath it; captions advance one day per cell starting at
/// `start`. Entries beyond the supplied icons (or vice versa) are dropped.
pub fn render_forecast_strip(
    entries: &[ForecastEntry],
    icons: &[WidgetBitmap],
    units: &str,
    start: NaiveDate,
) -> WidgetBitmap {
    let cells: Vec<WidgetBitmap> = entries
        .iter()
        .zip(icons)
        .map(|(entry, icon)| render_overlay(icon, &entry.low, Some(&entry.high), units))
        .collect();
    if cells.is_empty() {
        return WidgetBitmap::new(0, 0);
    }

    let caption_face = Typeface::default_for_size(FOOTER_TEXT_SIZE);
    let caption_band = caption_face.line_height() + 2;
    let cells_width: u32 = cells.iter().map(WidgetBitmap::width).sum();
    let width = cells_width + CELL_SPACING * (cells.len() as u32 - 1);
    let tallest = cells.iter().map(WidgetBitmap::height).max().unwrap_or(0);
    let mut strip = WidgetBitmap::new(width, tallest + caption_band);

    let mut x = 0i32;
    for (index, cell) in cells.iter().enumerate() {
        // Bottom-align cells so footers sit on one line
        strip.blit(cell, Point::new(x, (tallest - cell.height()) as i32));

        let date = start
            .checked_add_days(Days::new(index as u64))
            .unwrap_or(start);
        let caption = date
            .format(formats::best_pattern(Skeleton::ShortWeekday))
            .to_string();
        let caption_width = caption_face.measure(&caption, None);
        let origin = Point::new(
            x + cell.width() as i32 / 2 - caption_width as i32 / 2,
            caption_face.centered_baseline(caption_band) + tallest as i32,
        );
        draw_text_run(
            &mut strip,
            &caption,
            origin,
            &caption_face,
            FOOTER_COLOR,
            Some(FOOTER_SHADOW_OFFSET),
            None,
        );

        x += cell.width() as i32 + CELL_SPACING as i32;
    }
    strip
}

/// Procedural stand-in icon for a condition code.
///
/// Used by the preview binary and tests when no icon pack is configured;
/// code buckets follow the provider's condition table.
pub fn fallback_icon(condition_code: i32, size: u32) -> WidgetBitmap {
    use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};

    let mut bitmap = WidgetBitmap::new(size, size);
    if size < 8 {
        return bitmap;
    }
    let stroke = PrimitiveStyle::with_stroke(Argb::WHITE, (size / 16).max(1));
    let fill = PrimitiveStyle::with_fill(Argb::WHITE);
    let center = Point::new(size as i32 / 2, size as i32 / 2);

    match condition_code {
        // Thunderstorms
        0..=4 => {
            cloud(&mut bitmap, size);
            Line::new(
                center + Point::new(0, size as i32 / 8),
                center + Point::new(-(size as i32) / 8, size as i32 / 3),
            )
            .into_styled(stroke)
            .draw(&mut bitmap)
            .ok();
        }
        // Rain and showers
        5..=12 | 35..=40 | 45..=47 => {
            cloud(&mut bitmap, size);
            for dx in [-1i32, 0, 1] {
                let top = center + Point::new(dx * size as i32 / 6, size as i32 / 8);
                Line::new(top, top + Point::new(0, size as i32 / 6))
                    .into_styled(stroke)
                    .draw(&mut bitmap)
                    .ok();
            }
        }
        // Snow and sleet
        13..=18 | 41..=43 => {
            cloud(&mut bitmap, size);
            for dx in [-1i32, 0, 1] {
                let at = center + Point::new(dx * size as i32 / 6, size as i32 / 4);
                Circle::with_center(at, (size / 16).max(2))
                    .into_styled(fill)
                    .draw(&mut bitmap)
                    .ok();
            }
        }
        // Overcast and partly cloudy
        19..=30 | 44 => cloud(&mut bitmap, size),
        // Clear
        _ => {
            Circle::with_center(center, size / 3)
                .into_styled(fill)
                .draw(&mut bitmap)
                .ok();
            for ray in 0..8 {
                let angle = ray as f32 * 45.0;
                let from = crate::analog_clock::polar_point(center, angle, size as f32 / 3.0);
                let to = crate::analog_clock::polar_point(center, angle, size as f32 / 2.2);
                Line::new(from, to).into_styled(stroke).draw(&mut bitmap).ok();
            }
        }
    }
    bitmap
}

/// Two overlapping discs; close enough to a cloud at widget sizes.
fn cloud(bitmap: &mut WidgetBitmap, size: u32) {
    use embedded_graphics::primitives::{Circle, PrimitiveStyle};

    let fill = PrimitiveStyle::with_fill(Argb::WHITE);
    let center = Point::new(size as i32 / 2, size as i32 / 2);
    Circle::with_center(center + Point::new(-(size as i32) / 8, 0), size * 2 / 5)
        .into_styled(fill)
        .draw(bitmap)
        .ok();
    Circle::with_center(
        center + Point::new(size as i32 / 8, -(size as i32) / 10),
        size / 3,
    )
    .into_styled(fill)
    .draw(bitmap)
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon() -> WidgetBitmap {
        fallback_icon(32, 64) // clear-sky bucket
    }

    fn entries() -> Vec<ForecastEntry> {
        (0..3)
            .map(|day| ForecastEntry {
                condition_code: 28,
                low: format!("{}", 10 + day),
                high: format!("{}", 20 + day),
            })
            .collect()
    }

    #[test]
    fn footer_text_composition() {
        assert_eq!(footer_text("10", Some("20"), "°C"), "10/20°C");
        assert_eq!(footer_text("72", None, "°F"), "72°F");
    }

    #[test]
    fn overlay_dimensions_follow_icon() {
        let icon = icon();
        let overlay = render_overlay(&icon, "10", Some("20"), "°C");
        assert_eq!(overlay.width(), icon.width());
        assert_eq!(overlay.height(), icon.height() + FOOTER_HEIGHT);
        assert!(overlay.opaque_pixels() > icon.opaque_pixels());
    }

    #[test]
    fn overlay_without_high_still_renders() {
        let overlay = render_overlay(&icon(), "10", None, "°C");
        assert!(overlay.opaque_pixels() > 0);
    }

    #[test]
    fn overlay_is_idempotent() {
        let icon = icon();
        let a = render_overlay(&icon, "10", Some("20"), "°C");
        let b = render_overlay(&icon, "10", Some("20"), "°C");
        assert_eq!(a, b);
    }

    #[test]
    fn strip_lays_cells_left_to_right() {
        let entries = entries();
        let icons: Vec<WidgetBitmap> =
            entries.iter().map(|e| fallback_icon(e.condition_code, 64)).collect();
        let start = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let strip = render_forecast_strip(&entries, &icons, "°C", start);

        let cell = render_overlay(&icons[0], &entries[0].low, Some(&entries[0].high), "°C");
        let expected_width = cell.width() * 3 + CELL_SPACING * 2;
        assert_eq!(strip.width(), expected_width);
        assert!(strip.height() > cell.height());
    }

    #[test]
    fn empty_strip_is_zero_area() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let strip = render_forecast_strip(&[], &[], "°C", start);
        assert!(strip.is_empty());
    }

    #[test]
    fn fallback_icons_differ_by_bucket() {
        let clear = fallback_icon(32, 64);
        let rain = fallback_icon(11, 64);
        let cloudy = fallback_icon(26, 64);
        assert_ne!(clear, rain);
        assert_ne!(rain, cloudy);
    }
}
