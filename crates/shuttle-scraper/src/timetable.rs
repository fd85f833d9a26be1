//! Clock-time parsing and next-departure lookup over timetable columns.

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::Serialize;

const MINUTES_PER_DAY: u32 = 24 * 60;

static TWELVE_HOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*([ap])\.?\s*m\.?$").expect("valid 12-hour regex")
});

static TWENTY_FOUR_HOUR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid 24-hour regex"));

/// A departure found by [`next_departure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// The time as printed in the timetable.
    pub time: String,
    pub wait_minutes: u32,
}

/// Parses a timetable cell such as `"7:30 AM"`, `"7:30am"`, `"7:30 p.m."`,
/// or `"19:30"`.
///
/// Returns `None` for anything else, including out-of-range values like
/// `"13:00 PM"` and cells holding notes or dashes.
#[must_use]
pub fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();

    if let Some(caps) = TWELVE_HOUR_RE.captures(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = caps[3].eq_ignore_ascii_case("p");
        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        return NaiveTime::from_hms_opt(hour24, minute, 0);
    }

    let caps = TWENTY_FOUR_HOUR_RE.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[must_use]
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Finds the first entry in `times` strictly after `now`.
///
/// Entries are taken in timetable order. When no entry is later than `now`
/// the first parseable entry is returned as tomorrow's first departure.
/// Unparseable entries are skipped; `None` means nothing was parseable.
#[must_use]
pub fn next_departure<I, S>(now: NaiveTime, times: I) -> Option<Departure>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let now_minutes = minutes_since_midnight(now);
    let mut first_of_day: Option<(String, u32)> = None;

    for entry in times {
        let entry = entry.as_ref();
        let Some(parsed) = parse_clock_time(entry) else {
            continue;
        };
        let minutes = minutes_since_midnight(parsed);

        if minutes > now_minutes {
            return Some(Departure {
                time: entry.trim().to_owned(),
                wait_minutes: minutes - now_minutes,
            });
        }
        if first_of_day.is_none() {
            first_of_day = Some((entry.trim().to_owned(), minutes));
        }
    }

    first_of_day.map(|(time, minutes)| Departure {
        time,
        wait_minutes: MINUTES_PER_DAY - now_minutes + minutes,
    })
}

#[cfg(test)]
#[path = "timetable_test.rs"]
mod tests;
