//! # Date/Time Pattern Resolution
//!
//! The platform resolves abstract skeletons ("hma", "EHm", ...) into
//! locale-correct display patterns; the renderers only ever consume the
//! resolved pattern strings. This module is the table of resolved patterns
//! for the build's locale plus the small manipulations the renderers need
//! (meridiem stripping, alarm formatting).

use chrono::NaiveDateTime;

/// Abstract field-order skeletons the widgets ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skeleton {
    /// 12-hour time with meridiem ("hma")
    HourMinute12,
    /// 12-hour time with seconds and meridiem ("hmsa")
    HourMinuteSecond12,
    /// 24-hour time ("Hm")
    HourMinute24,
    /// 24-hour time with seconds ("Hms")
    HourMinuteSecond24,
    /// Weekday plus 24-hour time ("EHm"), used for alarm labels
    WeekdayHourMinute24,
    /// Weekday plus 12-hour time with meridiem ("Ehma")
    WeekdayHourMinute12,
    /// Abbreviated weekday, month and day, no year
    AbbrevWeekdayMonthDay,
    /// Full weekday, month and day, no year
    FullWeekdayMonthDay,
    /// Short weekday only, for forecast strip captions
    ShortWeekday,
}

/// Locale-resolved display pattern for a skeleton.
pub fn best_pattern(skeleton: Skeleton) -> &'static str {
    match skeleton {
        Skeleton::HourMinute12 => "%-I:%M %p",
        Skeleton::HourMinuteSecond12 => "%-I:%M:%S %p",
        Skeleton::HourMinute24 => "%H:%M",
        Skeleton::HourMinuteSecond24 => "%H:%M:%S",
        Skeleton::WeekdayHourMinute24 => "%a %H:%M",
        Skeleton::WeekdayHourMinute12 => "%a %-I:%M %p",
        Skeleton::AbbrevWeekdayMonthDay => "%a, %b %-d",
        Skeleton::FullWeekdayMonthDay => "%A, %B %-d",
        Skeleton::ShortWeekday => "%a",
    }
}

/// Remove the meridiem field from a resolved pattern.
///
/// Used when the AM/PM designator renders separately at reduced size: the
/// primary string must not repeat it.
pub fn strip_meridiem(pattern: &str) -> String {
    let stripped = pattern.replace("%p", "").replace("%P", "");
    let mut out = String::with_capacity(stripped.len());
    let mut last_space = false;
    for ch in stripped.chars() {
        if ch == ' ' {
            if last_space {
                continue;
            }
            last_space = true;
        } else {
            last_space = false;
        }
        out.push(ch);
    }
    out.trim().to_string()
}

/// The meridiem designator ("AM"/"PM") for an instant.
pub fn meridiem(now: NaiveDateTime) -> String {
    now.format("%p").to_string()
}

/// Format a next-alarm instant for display.
///
/// Matches the host's 12/24-hour setting, weekday included so an alarm
/// tomorrow is unambiguous.
pub fn format_alarm(alarm: NaiveDateTime, use_24h: bool) -> String {
    let skeleton = if use_24h {
        Skeleton::WeekdayHourMinute24
    } else {
        Skeleton::WeekdayHourMinute12
    };
    alarm.format(best_pattern(skeleton)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn strip_meridiem_removes_field_and_spacing() {
        assert_eq!(strip_meridiem("%-I:%M %p"), "%-I:%M");
        assert_eq!(strip_meridiem("%p %-I:%M"), "%-I:%M");
        assert_eq!(strip_meridiem("%H:%M"), "%H:%M");
    }

    #[test]
    fn meridiem_designator() {
        assert_eq!(meridiem(at(3, 30)), "AM");
        assert_eq!(meridiem(at(15, 30)), "PM");
    }

    #[test]
    fn alarm_formatting_follows_hour_setting() {
        // 2026-08-06 is a Thursday
        assert_eq!(format_alarm(at(6, 5), true), "Thu 06:05");
        assert_eq!(format_alarm(at(18, 5), false), "Thu 6:05 PM");
    }

    #[test]
    fn date_patterns_format() {
        let date = at(0, 0);
        assert_eq!(
            date.format(best_pattern(Skeleton::AbbrevWeekdayMonthDay))
                .to_string(),
            "Thu, Aug 6"
        );
        assert_eq!(
            date.format(best_pattern(Skeleton::FullWeekdayMonthDay))
                .to_string(),
            "Thursday, August 6"
        );
    }
}
