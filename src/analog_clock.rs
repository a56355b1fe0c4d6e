//! # Analog Clock Face Rendering
//!
//! Draws the round widget face: background disc, outer track, a
//! "remaining minutes" arc that leaves the elapsed part of the hour
//! undrawn, hour/minute hands with a counterweight tail, a center dot,
//! and optional date/alarm labels that follow the track on semicircular
//! paths.
//!
//! ## Angle convention
//!
//! All angles in this module are screen angles: 0° at 3 o'clock,
//! increasing clockwise, with the y axis pointing down. That makes hand
//! math read like a clock (12:00 is −90°) and keeps every formula in one
//! convention; [`face_arc`] is the single place where values convert to
//! the drawing backend's counterclockwise measure.
//!
//! Hands are drawn with a polar transform instead of a canvas rotation:
//! endpoints come out of [`polar_point`], so there is no transform state
//! that could leak between draws.

use chrono::NaiveDateTime;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::bitmap::{Argb, WidgetBitmap};
use crate::formats::{self, Skeleton};
use crate::typeface::Typeface;
use crate::TimeSnapshot;

/// Face edge length in pixels (square canvas).
pub const ANALOG_SIZE: u32 = 300;
/// Stroke width of the outer track circle.
const TRACK_STROKE: u32 = 8;
/// Counterweight tail length behind the pivot.
const HAND_OVERHANG: u32 = 20;
const HOUR_HAND_WIDTH: u32 = 8;
const MINUTE_HAND_WIDTH: u32 = 4;
/// Text size of the curved date/alarm labels.
const LABEL_TEXT_SIZE: u32 = 26;
/// Hour hand reaches 70% of the track radius.
const HOUR_HAND_FRACTION: f32 = 0.70;
/// Sweep of the alarm tick mark on the inner track.
const ALARM_TICK_SWEEP_DEG: f32 = 4.0;

/// Fixed dimensions of a clock face.
///
/// Invariant: `radius() == size/2 − track_stroke`, so the stroked track
/// stays fully inside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockFaceGeometry {
    /// Canvas edge length
    pub size: u32,
    /// Track circle stroke width
    pub track_stroke: u32,
    /// Counterweight tail length
    pub hand_overhang: u32,
}

impl ClockFaceGeometry {
    pub fn for_size(size: u32) -> Self {
        ClockFaceGeometry {
            size,
            track_stroke: TRACK_STROKE,
            hand_overhang: HAND_OVERHANG,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.size as i32 / 2, self.size as i32 / 2)
    }

    /// Track radius: half the canvas minus the track stroke.
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0 - self.track_stroke as f32
    }

    pub fn hour_hand_len(&self) -> f32 {
        self.radius() * HOUR_HAND_FRACTION
    }

    /// The minute hand overshoots the track to its outer edge.
    pub fn minute_hand_len(&self) -> f32 {
        self.radius() + self.track_stroke as f32 / 2.0
    }
}

/// Face colors; defaults match the stock widget theme.
#[derive(Clone, Copy, Debug)]
pub struct ClockPalette {
    pub background: Argb,
    pub track: Argb,
    pub remaining: Argb,
    pub hour_hand: Argb,
    pub minute_hand: Argb,
    pub center_dot: Argb,
    pub alarm: Argb,
    pub label: Argb,
}

impl Default for ClockPalette {
    fn default() -> Self {
        ClockPalette {
            background: Argb::new(0x66, 0x00, 0x00, 0x00),
            track: Argb::from_u32(0xFF26_A69A),
            remaining: Argb::from_u32(0xFF80_CBC4),
            hour_hand: Argb::WHITE,
            minute_hand: Argb::from_u32(0xFFB2_DFDB),
            center_dot: Argb::from_u32(0xFF80_CBC4),
            alarm: Argb::from_u32(0xFFFF_7043),
            label: Argb::WHITE,
        }
    }
}

/// Feature toggles for one face render.
#[derive(Clone, Copy, Debug)]
pub struct AnalogClockOptions {
    /// Curved date label on the lower label path
    pub show_date: bool,
    /// Curved next-alarm label on the upper label path
    pub show_alarm: bool,
    /// Tick mark on the inner track at the next alarm's hour position.
    /// Off by default; the stock widget never shipped with it enabled.
    pub show_alarm_tick: bool,
    /// Format the alarm label with the host's 24-hour setting
    pub use_24h: bool,
}

impl Default for AnalogClockOptions {
    fn default() -> Self {
        AnalogClockOptions {
            show_date: true,
            show_alarm: true,
            show_alarm_tick: false,
            use_24h: false,
        }
    }
}

/// One stroked segment of the track circle, in screen angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSpan {
    pub start_deg: f32,
    pub sweep_deg: f32,
}

/// Hand angle for a value within its period: `value/period × 360 − 90`,
/// so a zero value points straight up.
pub fn hand_angle_deg(value: f32, period: f32) -> f32 {
    value / period * 360.0 - 90.0
}

/// Arc segments left drawn on the track to show minutes remaining in the
/// current hour.
///
/// The elapsed portion (sweep `minute_angle`, ending at 12 o'clock) stays
/// undrawn. While `minute_angle < 90` the remaining portion crosses the
/// 0°/360° seam, so it takes two segments; afterwards a single segment
/// suffices. Total drawn sweep is always `360 − minute_angle`.
pub fn remaining_arc_spans(minute_angle: f32) -> (ArcSpan, Option<ArcSpan>) {
    if minute_angle < 90.0 {
        (
            ArcSpan {
                start_deg: 270.0 + minute_angle,
                sweep_deg: 90.0 - minute_angle,
            },
            Some(ArcSpan {
                start_deg: 0.0,
                sweep_deg: 270.0,
            }),
        )
    } else {
        (
            ArcSpan {
                start_deg: minute_angle - 90.0,
                sweep_deg: 360.0 - minute_angle,
            },
            None,
        )
    }
}

/// Point at `length` from `center` along a screen angle.
pub(crate) fn polar_point(center: Point, angle_deg: f32, length: f32) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(
        center.x + (rad.cos() * length).round() as i32,
        center.y + (rad.sin() * length).round() as i32,
    )
}

/// Render the analog face at the stock widget size.
pub fn render_analog_clock(
    snapshot: &TimeSnapshot,
    options: &AnalogClockOptions,
    next_alarm: Option<NaiveDateTime>,
) -> WidgetBitmap {
    let geometry = ClockFaceGeometry::for_size(ANALOG_SIZE);
    let mut bitmap = WidgetBitmap::new(geometry.size, geometry.size);
    draw_clock_face(
        &mut bitmap,
        &geometry,
        &ClockPalette::default(),
        snapshot,
        options,
        next_alarm,
    );
    bitmap
}

/// Draw the face onto any ARGB target (host surfaces with their own
/// buffers reuse this directly).
pub fn draw_clock_face<D>(
    target: &mut D,
    geometry: &ClockFaceGeometry,
    palette: &ClockPalette,
    snapshot: &TimeSnapshot,
    options: &AnalogClockOptions,
    next_alarm: Option<NaiveDateTime>,
) where
    D: DrawTarget<Color = Argb>,
{
    let center = geometry.center();
    let radius = geometry.radius();
    let diameter = (radius * 2.0).round() as u32;

    // Background disc, then the full track ring over it
    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_fill(palette.background))
        .draw(target)
        .ok();
    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_stroke(palette.track, geometry.track_stroke))
        .draw(target)
        .ok();

    let minute_angle = snapshot.minute / 60.0 * 360.0;
    let (first, second) = remaining_arc_spans(minute_angle);
    let remaining_style = PrimitiveStyle::with_stroke(palette.remaining, geometry.track_stroke);
    face_arc(center, radius, first)
        .into_styled(remaining_style)
        .draw(target)
        .ok();
    if let Some(span) = second {
        face_arc(center, radius, span)
            .into_styled(remaining_style)
            .draw(target)
            .ok();
    }

    let label_face = Typeface::default_for_size(LABEL_TEXT_SIZE);
    if options.show_date {
        let date_text = snapshot
            .taken_at
            .format(formats::best_pattern(Skeleton::AbbrevWeekdayMonthDay))
            .to_string()
            .to_uppercase();
        let label_radius = radius - 2.0 * LABEL_TEXT_SIZE as f32;
        draw_label_on_arc(
            target,
            &date_text,
            center,
            label_radius,
            180.0,
            1.0,
            &label_face,
            palette.label,
        );
    }

    if options.show_alarm {
        if let Some(alarm) = next_alarm {
            if options.show_alarm_tick && within_next_12h(snapshot.taken_at, alarm) {
                let alarm_hour = hour_fraction(alarm);
                let tick = ArcSpan {
                    start_deg: hand_angle_deg(alarm_hour, 12.0) - ALARM_TICK_SWEEP_DEG,
                    sweep_deg: ALARM_TICK_SWEEP_DEG,
                };
                face_arc(center, radius - geometry.track_stroke as f32, tick)
                    .into_styled(PrimitiveStyle::with_stroke(
                        palette.alarm,
                        geometry.track_stroke,
                    ))
                    .draw(target)
                    .ok();
            }

            let alarm_text = formats::format_alarm(alarm, options.use_24h).to_uppercase();
            let label_radius = radius - LABEL_TEXT_SIZE as f32;
            // Reverse traversal keeps the glyph order readable on this side
            draw_label_on_arc(
                target,
                &alarm_text,
                center,
                label_radius,
                180.0,
                -1.0,
                &label_face,
                palette.label,
            );
        }
    }

    draw_hand(
        target,
        center,
        hand_angle_deg(snapshot.hour, 12.0),
        geometry.hour_hand_len(),
        geometry.hand_overhang as f32,
        HOUR_HAND_WIDTH,
        palette.hour_hand,
    );
    draw_hand(
        target,
        center,
        hand_angle_deg(snapshot.minute, 60.0),
        geometry.minute_hand_len(),
        geometry.hand_overhang as f32,
        MINUTE_HAND_WIDTH,
        palette.minute_hand,
    );

    // Center dot radius equals the hour hand stroke width
    Circle::with_center(center, HOUR_HAND_WIDTH * 2)
        .into_styled(PrimitiveStyle::with_fill(palette.center_dot))
        .draw(target)
        .ok();
}

/// One hand: a line from the pivot to the tip and a short counterweight
/// tail on the opposite side, both from the same polar transform.
fn draw_hand<D>(
    target: &mut D,
    center: Point,
    angle_deg: f32,
    length: f32,
    overhang: f32,
    width: u32,
    color: Argb,
) where
    D: DrawTarget<Color = Argb>,
{
    let style = PrimitiveStyle::with_stroke(color, width);
    Line::new(center, polar_point(center, angle_deg, length))
        .into_styled(style)
        .draw(target)
        .ok();
    Line::new(center, polar_point(center, angle_deg + 180.0, overhang))
        .into_styled(style)
        .draw(target)
        .ok();
}

/// Place a label's glyphs one by one along a circular path.
///
/// `direction` is +1 to advance clockwise from `start_deg`, −1 for the
/// reverse traversal. Glyphs stay axis-aligned; only their anchor points
/// follow the arc.
#[allow(clippy::too_many_arguments)]
fn draw_label_on_arc<D>(
    target: &mut D,
    text: &str,
    center: Point,
    radius: f32,
    start_deg: f32,
    direction: f32,
    face: &Typeface,
    color: Argb,
) where
    D: DrawTarget<Color = Argb>,
{
    if radius <= 1.0 || text.is_empty() {
        return;
    }
    let style = MonoTextStyle::new(face.font(), color);
    let anchor = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    let advance = (face.char_width() as i32 + face.char_gap(None)) as f32;
    let step_deg = direction * (advance / radius).to_degrees();

    let mut angle = start_deg + step_deg / 2.0;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let glyph = ch.encode_utf8(&mut buf);
        let position = polar_point(center, angle, radius);
        Text::with_text_style(glyph, position, style, anchor)
            .draw(target)
            .ok();
        angle += step_deg;
    }
}

/// Build a backend arc from a screen-angle span.
///
/// Screen angles run clockwise; the backend measures counterclockwise, so
/// start and sweep both negate here and nowhere else.
fn face_arc(center: Point, radius: f32, span: ArcSpan) -> Arc {
    Arc::with_center(
        center,
        (radius * 2.0).round() as u32,
        (-span.start_deg).deg(),
        (-span.sweep_deg).deg(),
    )
}

fn hour_fraction(time: NaiveDateTime) -> f32 {
    use chrono::Timelike;
    time.hour() as f32 + time.minute() as f32 / 60.0
}

fn within_next_12h(now: NaiveDateTime, alarm: NaiveDateTime) -> bool {
    let minutes = alarm.signed_duration_since(now).num_minutes();
    (0..=12 * 60).contains(&minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPSILON: f32 = 1e-3;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn geometry_invariant_holds() {
        let g = ClockFaceGeometry::for_size(ANALOG_SIZE);
        assert_eq!(
            g.radius(),
            ANALOG_SIZE as f32 / 2.0 - g.track_stroke as f32
        );
        assert!((g.hour_hand_len() - g.radius() * 0.70).abs() < EPSILON);
        assert!(
            (g.minute_hand_len() - (g.radius() + g.track_stroke as f32 / 2.0)).abs() < EPSILON
        );
    }

    #[test]
    fn hand_angles_for_three_thirty() {
        // 03:30 -> hour fraction 3.5 -> 15 deg; minute 30 -> 90 deg
        assert!((hand_angle_deg(3.5, 12.0) - 15.0).abs() < EPSILON);
        assert!((hand_angle_deg(30.0, 60.0) - 90.0).abs() < EPSILON);
    }

    #[test]
    fn hand_angles_stay_in_range() {
        for minute in 0..60 {
            let angle = hand_angle_deg(minute as f32, 60.0);
            assert!((-90.0..270.0).contains(&angle), "minute {minute}: {angle}");
        }
        for hour in 0..24 {
            let angle = hand_angle_deg((hour % 12) as f32, 12.0);
            assert!((-90.0..270.0).contains(&angle), "hour {hour}: {angle}");
        }
    }

    #[test]
    fn arc_spans_split_below_quarter_hour() {
        // minute 10 -> 60 deg -> two segments (330, 30) and (0, 270)
        let (first, second) = remaining_arc_spans(60.0);
        assert!((first.start_deg - 330.0).abs() < EPSILON);
        assert!((first.sweep_deg - 30.0).abs() < EPSILON);
        let second = second.expect("seam crossing needs a second segment");
        assert!((second.start_deg - 0.0).abs() < EPSILON);
        assert!((second.sweep_deg - 270.0).abs() < EPSILON);
    }

    #[test]
    fn arc_spans_cover_remaining_sweep_for_all_minutes() {
        for tenths in 0..600 {
            let minute = tenths as f32 / 10.0;
            let minute_angle = minute / 60.0 * 360.0;
            let (first, second) = remaining_arc_spans(minute_angle);
            let total = first.sweep_deg + second.map_or(0.0, |s| s.sweep_deg);
            assert!(
                (total - (360.0 - minute_angle)).abs() < 1e-2,
                "minute {minute}: drawn {total}, expected {}",
                360.0 - minute_angle
            );
            assert!(second.is_some() == (minute_angle < 90.0));
        }
    }

    #[test]
    fn arc_spans_boundary_minutes() {
        // minute 0 selects the seam-crossing branch with a full 360 sweep
        let (first, second) = remaining_arc_spans(0.0);
        assert!((first.start_deg - 270.0).abs() < EPSILON);
        assert!((first.sweep_deg - 90.0).abs() < EPSILON);
        assert!(second.is_some());

        // minute 59.999 selects the single-segment branch, near-zero sweep
        let minute_angle = 59.999f32 / 60.0 * 360.0;
        let (first, second) = remaining_arc_spans(minute_angle);
        assert!(second.is_none());
        assert!(first.sweep_deg >= 0.0 && first.sweep_deg < 0.01);
    }

    #[test]
    fn polar_points_match_clock_positions() {
        let center = Point::new(100, 100);
        // -90 deg points straight up (12 o'clock), 90 deg straight down
        assert_eq!(polar_point(center, -90.0, 50.0), Point::new(100, 50));
        assert_eq!(polar_point(center, 90.0, 50.0), Point::new(100, 150));
        assert_eq!(polar_point(center, 0.0, 50.0), Point::new(150, 100));
    }

    #[test]
    fn face_render_is_idempotent() {
        let snapshot = TimeSnapshot::capture(at(3, 30));
        let options = AnalogClockOptions::default();
        let alarm = Some(at(6, 45));
        let a = render_analog_clock(&snapshot, &options, alarm);
        let b = render_analog_clock(&snapshot, &options, alarm);
        assert_eq!(a, b);
        assert_eq!(a.width(), ANALOG_SIZE);
        assert!(a.opaque_pixels() > 0);
    }

    #[test]
    fn missing_alarm_skips_label_silently() {
        let snapshot = TimeSnapshot::capture(at(3, 30));
        let options = AnalogClockOptions::default();
        let without = render_analog_clock(&snapshot, &options, None);
        let with = render_analog_clock(&snapshot, &options, Some(at(6, 45)));
        // The alarm label changes the face; its absence must not fault
        assert_ne!(with, without);
    }

    #[test]
    fn alarm_tick_is_off_by_default() {
        let snapshot = TimeSnapshot::capture(at(3, 30));
        let defaults = AnalogClockOptions::default();
        assert!(!defaults.show_alarm_tick);

        let flagged = AnalogClockOptions {
            show_alarm_tick: true,
            ..defaults
        };
        let plain = render_analog_clock(&snapshot, &defaults, Some(at(6, 45)));
        let ticked = render_analog_clock(&snapshot, &flagged, Some(at(6, 45)));
        assert_ne!(ticked, plain);
    }
}
