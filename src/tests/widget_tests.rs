//! # End-to-End Widget Rendering Tests
//!
//! These tests exercise the full path a host update would take: resolve
//! preferences into a style, capture a time snapshot, render every widget
//! bitmap, and check the results stay deterministic and well-formed.

use chrono::{NaiveDate, NaiveDateTime};
use clock_widget_lib::analog_clock::{render_analog_clock, AnalogClockOptions, ANALOG_SIZE};
use clock_widget_lib::config::{PrefStore, WidgetId, WidgetPrefs};
use clock_widget_lib::formats::{best_pattern, Skeleton};
use clock_widget_lib::text_clock::{render_status_row, render_time};
use clock_widget_lib::weather_data;
use clock_widget_lib::weather_overlay::{fallback_icon, render_forecast_strip};
use clock_widget_lib::{TimeSnapshot, WidgetBitmap};

use crate::{parse_alarm, parse_widget_id};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 6)
        .unwrap()
        .and_hms_opt(3, 30, 0)
        .unwrap()
}

/// The complete widget set for one preference record, as the preview
/// binary renders it.
fn render_widget_set(prefs: &WidgetPrefs, now: NaiveDateTime) -> Vec<WidgetBitmap> {
    let style = prefs.render_style();
    let snapshot = TimeSnapshot::capture(now);
    let alarm = Some(fixed_now() + chrono::Duration::hours(3));

    let digital = render_time(best_pattern(Skeleton::HourMinute12), &style, true, now);
    let status = render_status_row(&style, true, true, alarm, now, prefs.use_24h)
        .expect("date and alarm are both visible");
    let analog = render_analog_clock(&snapshot, &AnalogClockOptions::default(), alarm);

    let info = weather_data::placeholder();
    let icons: Vec<WidgetBitmap> = info
        .forecasts
        .iter()
        .map(|f| fallback_icon(f.condition_code, 64))
        .collect();
    let strip = render_forecast_strip(&info.forecasts, &icons, &info.temp_units, now.date());

    vec![digital, status, analog, strip]
}

#[test]
fn full_widget_set_renders_with_default_prefs() {
    let prefs = PrefStore::default().prefs(WidgetId(1));
    let set = render_widget_set(&prefs, fixed_now());

    for bitmap in &set {
        assert!(!bitmap.is_empty(), "every widget should produce pixels");
        assert!(bitmap.opaque_pixels() > 0);
    }
    // The analog face keeps its fixed square canvas
    assert_eq!(set[2].width(), ANALOG_SIZE);
    assert_eq!(set[2].height(), ANALOG_SIZE);
}

#[test]
fn widget_set_is_deterministic() {
    let prefs = WidgetPrefs::default();
    let a = render_widget_set(&prefs, fixed_now());
    let b = render_widget_set(&prefs, fixed_now());
    assert_eq!(a, b);
}

#[test]
fn ascii_previews_have_visible_content() {
    let prefs = WidgetPrefs::default();
    let set = render_widget_set(&prefs, fixed_now());
    for bitmap in &set {
        let art = bitmap.ascii_art(80);
        assert!(
            art.chars().any(|c| c != ' ' && c != '\n'),
            "preview should contain shaded cells"
        );
        assert!(art.lines().all(|l| l.chars().count() <= 80));
    }
}

#[test]
fn widget_flag_parsing_defaults() {
    let args: Vec<String> = vec![];
    assert_eq!(parse_widget_id(&args), WidgetId(1));

    let args: Vec<String> = ["--widget", "7"].iter().map(|s| s.to_string()).collect();
    assert_eq!(parse_widget_id(&args), WidgetId(7));
}

#[test]
fn alarm_argument_resolves_to_next_occurrence() {
    let now = fixed_now(); // 03:30
    let args: Vec<String> = ["--alarm", "06:45"].iter().map(|s| s.to_string()).collect();
    let alarm = parse_alarm(&args, now).unwrap();
    assert_eq!(alarm.date(), now.date());

    // A time already past today rolls over to tomorrow
    let args: Vec<String> = ["--alarm", "01:00"].iter().map(|s| s.to_string()).collect();
    let alarm = parse_alarm(&args, now).unwrap();
    assert_eq!(alarm.date(), now.date().succ_opt().unwrap());

    let args: Vec<String> = ["--alarm", "not-a-time"].iter().map(|s| s.to_string()).collect();
    assert!(parse_alarm(&args, now).is_none());
}
