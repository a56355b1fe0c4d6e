//! # Clock Widgets Core Library
//!
//! This library renders home-screen style widget bitmaps: digital clock
//! text, an analog clock face, and weather forecast overlays. It targets
//! small always-on dashboards where the host surface only knows how to
//! display a finished raster.
//!
//! ## Design Philosophy
//!
//! ### Deterministic rendering
//! - **Stateless renderers**: every call allocates its own canvas and paint
//!   state and returns an independent [`WidgetBitmap`]; two calls with the
//!   same inputs produce pixel-identical output
//! - **Explicit time**: callers capture a [`TimeSnapshot`] once per render
//!   so hand angles and arc sweeps stay mutually consistent within a frame
//! - **No hidden lookups**: styles and per-widget preferences are resolved
//!   by the caller and passed in by value; the renderers never touch the
//!   preference store
//!
//! ### Collaborators
//! The renderers depend on data the platform supplies:
//! - **Weather provider** ([`weather_data`]): a structured forecast
//!   document, consumed read-only
//! - **Alarm/time source**: the next alarm trigger time (or absence) and
//!   the current wall clock
//! - **Icon packs**: condition icons arrive as plain ARGB bitmaps
//!
//! ### Data Flow
//! 1. **Configure**: load per-widget preferences ([`config::PrefStore`])
//! 2. **Resolve**: build a [`RenderStyle`] (typeface, size, color, shadow)
//! 3. **Render**: produce bitmaps via [`text_clock`], [`analog_clock`],
//!    [`weather_overlay`]
//! 4. **Deliver**: hand the rasters to the host surface (out of scope here;
//!    the preview binary prints ASCII art instead)
//!
//! ## Core Types
//!
//! - [`RenderStyle`]: typeface, size, color, shadow and letter spacing
//! - [`TimeSnapshot`]: the wall clock captured once per render call
//! - [`WeatherInfo`] / [`ForecastEntry`]: read-only forecast data

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod analog_clock;
pub mod bitmap;
pub mod config;
pub mod formats;
pub mod text_clock;
pub mod typeface;
pub mod weather_data;
pub mod weather_overlay;

pub use bitmap::{Argb, WidgetBitmap};
pub use typeface::Typeface;

/// Text rendering parameters, passed by value into each render call.
///
/// A style is built once from the per-widget preferences and reused for all
/// bitmaps of that widget. `letter_spacing` is an em fraction added between
/// characters; `None` keeps the typeface's own spacing.
///
/// # Example
/// ```
/// use clock_widget_lib::{Argb, RenderStyle, Typeface};
///
/// let style = RenderStyle {
///     typeface: Typeface::default_for_size(24),
///     text_size_px: 24,
///     color: Argb::WHITE,
///     shadow: true,
///     letter_spacing: None,
/// };
/// assert!(style.typeface.line_height() > 0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RenderStyle {
    /// Resolved typeface to rasterize with
    pub typeface: Typeface,
    /// Requested text size in pixels (the typeface snaps to the nearest face)
    pub text_size_px: u32,
    /// Text color (ARGB)
    pub color: Argb,
    /// Draw a dark halo behind the text
    pub shadow: bool,
    /// Extra tracking as an em fraction; `None` means the font default
    pub letter_spacing: Option<f32>,
}

/// Wall-clock state captured once per render call.
///
/// `hour` is the fractional hour of day (`hour + minute/60`) and `minute`
/// the minute within the hour, both as floats so hand angles and the
/// remaining-minutes arc derive from the same instant. The capture instant
/// itself is kept for the date and alarm labels.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use clock_widget_lib::TimeSnapshot;
///
/// let now = NaiveDate::from_ymd_opt(2026, 8, 6)
///     .unwrap()
///     .and_hms_opt(3, 30, 0)
///     .unwrap();
/// let snap = TimeSnapshot::capture(now);
/// assert_eq!(snap.hour, 3.5);
/// assert_eq!(snap.minute, 30.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSnapshot {
    /// Fractional hour of day in `[0, 24)`
    pub hour: f32,
    /// Minute within the hour in `[0, 60)`
    pub minute: f32,
    /// The instant this snapshot was taken
    pub taken_at: NaiveDateTime,
}

impl TimeSnapshot {
    /// Capture a snapshot from a wall-clock instant.
    pub fn capture(now: NaiveDateTime) -> Self {
        let minute = now.minute() as f32;
        TimeSnapshot {
            hour: now.hour() as f32 + minute / 60.0,
            minute,
            taken_at: now,
        }
    }

    /// Snapshot with explicit fractional fields, for synthetic clocks.
    pub fn with_time(hour: f32, minute: f32, taken_at: NaiveDateTime) -> Self {
        TimeSnapshot {
            hour,
            minute,
            taken_at,
        }
    }
}

/// One day of forecast data, supplied by the weather provider.
///
/// Temperatures stay in the provider's string form; the renderers compose
/// them verbatim into footer text and never parse or convert units.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Provider condition code, used to pick a condition icon
    pub condition_code: i32,
    /// Daily low temperature, already formatted
    pub low: String,
    /// Daily high temperature, already formatted
    pub high: String,
}

/// Complete forecast document from the weather provider, consumed read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherInfo {
    /// Current condition code
    pub condition_code: i32,
    /// Current temperature, already formatted
    pub temp: String,
    /// Temperature unit suffix, e.g. `"°C"`
    pub temp_units: String,
    /// Provider-side observation time (epoch milliseconds)
    pub timestamp: i64,
    /// Resolved location name
    pub city: String,
    /// Wind speed, already formatted
    pub wind_speed: String,
    /// Wind speed unit suffix
    pub wind_units: String,
    /// Wind direction, already formatted
    pub wind_direction: String,
    /// Relative humidity, already formatted
    pub humidity: String,
    /// Daily forecasts, today first
    pub forecasts: Vec<ForecastEntry>,
}
