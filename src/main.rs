//! # Clock Widgets Preview Binary
//!
//! Development front end for the widget renderers: renders the digital
//! clock, status row, analog face and weather strip for one widget's
//! preferences and prints them as ASCII art, so layout changes can be
//! checked without a host surface.
//!
//! The host platform normally supplies the next alarm and the weather
//! document; in preview mode `--alarm HH:MM` stands in for the alarm
//! source and a placeholder forecast covers a missing provider file.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Result;
use chrono::{Days, Local, NaiveDateTime, NaiveTime};
use std::env;
use std::path::Path;

use clock_widget_lib::analog_clock::{render_analog_clock, AnalogClockOptions};
use clock_widget_lib::config::{PrefStore, WidgetId};
use clock_widget_lib::formats::{best_pattern, Skeleton};
use clock_widget_lib::text_clock::{render_status_row, render_time};
use clock_widget_lib::weather_data;
use clock_widget_lib::weather_overlay::{fallback_icon, render_forecast_strip, render_overlay};
use clock_widget_lib::{TimeSnapshot, WidgetBitmap};

/// Terminal column limit for ASCII previews.
const PREVIEW_COLS: u32 = 80;
/// Edge length of generated preview condition icons.
const PREVIEW_ICON_SIZE: u32 = 64;

/// Pick the widget id from `--widget N`, defaulting to the first widget.
fn parse_widget_id(args: &[String]) -> WidgetId {
    args.iter()
        .position(|a| a == "--widget")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .map(WidgetId)
        .unwrap_or(WidgetId(1))
}

/// Stand-in for the platform alarm source: `--alarm HH:MM` becomes the
/// next occurrence of that wall-clock time.
fn parse_alarm(args: &[String], now: NaiveDateTime) -> Option<NaiveDateTime> {
    let value = args
        .iter()
        .position(|a| a == "--alarm")
        .and_then(|i| args.get(i + 1))?;
    let time = NaiveTime::parse_from_str(value, "%H:%M").ok()?;
    let candidate = now.date().and_time(time);
    if candidate > now {
        Some(candidate)
    } else {
        now.date()
            .checked_add_days(Days::new(1))
            .map(|d| d.and_time(time))
    }
}

fn print_preview(title: &str, bitmap: &WidgetBitmap) {
    println!("── {title} ({}x{}) ──", bitmap.width(), bitmap.height());
    print!("{}", bitmap.ascii_art(PREVIEW_COLS));
    println!();
}

/// Main application entry point.
fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let selected = |flag: &str| args.iter().any(|a| a == flag);
    // With no widget flags at all, preview everything
    let all = !["--digital", "--status", "--analog", "--weather"]
        .into_iter()
        .any(|f| selected(f));

    let widget = parse_widget_id(&args);
    let store = PrefStore::load();
    let prefs = store.prefs(widget);
    let style = prefs.render_style();

    let now = Local::now().naive_local();
    let snapshot = TimeSnapshot::capture(now);
    let next_alarm = parse_alarm(&args, now);
    log::info!("previewing {widget} at {now}");

    if all || selected("--digital") {
        let skeleton = if prefs.use_24h {
            Skeleton::HourMinute24
        } else {
            Skeleton::HourMinute12
        };
        let bitmap = render_time(best_pattern(skeleton), &style, !prefs.use_24h, now);
        print_preview("digital clock", &bitmap);
    }

    if all || selected("--status") {
        match render_status_row(
            &style,
            prefs.show_date,
            prefs.show_alarm,
            next_alarm,
            now,
            prefs.use_24h,
        ) {
            Some(bitmap) => print_preview("status row", &bitmap),
            None => println!("── status row: nothing to show ──\n"),
        }
    }

    if all || selected("--analog") {
        let options = AnalogClockOptions {
            show_date: prefs.show_date,
            show_alarm: prefs.show_alarm,
            show_alarm_tick: prefs.show_alarm_tick,
            use_24h: prefs.use_24h,
        };
        let bitmap = render_analog_clock(&snapshot, &options, next_alarm);
        print_preview("analog clock", &bitmap);
    }

    if all || selected("--weather") {
        // Fall back to a canned forecast rather than failing the preview
        let info = weather_data::load(Path::new(weather_data::DEFAULT_PROVIDER_PATH))
            .unwrap_or_else(|err| {
                log::warn!("weather data unavailable: {err}; using placeholder");
                weather_data::placeholder()
            });

        let current_icon = fallback_icon(info.condition_code, PREVIEW_ICON_SIZE);
        let current = render_overlay(&current_icon, &info.temp, None, &info.temp_units);
        print_preview(&format!("current conditions, {}", info.city), &current);

        let icons: Vec<WidgetBitmap> = info
            .forecasts
            .iter()
            .map(|f| fallback_icon(f.condition_code, PREVIEW_ICON_SIZE))
            .collect();
        let strip = render_forecast_strip(&info.forecasts, &icons, &info.temp_units, now.date());
        print_preview("forecast strip", &strip);
    }

    Ok(())
}
