//! Plain-text rendering of a scrape for the terminal.

use std::fmt::Write as _;

use chrono::NaiveTime;
use shuttle_scraper::{DayType, ScrapeResult};

/// Route codes and schedule tables, one per line.
pub(crate) fn render_summary(result: &ScrapeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scraped {}", result.url);

    let _ = writeln!(out, "\nFound {} routes:", result.routes.len());
    for (code, route) in &result.routes {
        let _ = write!(out, "  - {code}");
        if !route.description.is_empty() {
            let _ = write!(out, ": {}", route.description);
        }
        out.push('\n');
        if !route.path.is_empty() {
            let _ = writeln!(out, "      {}", route.path);
        }
    }

    let _ = writeln!(out, "\nFound {} schedule tables:", result.schedules.len());
    for (key, table) in &result.schedules {
        let _ = writeln!(
            out,
            "  - {key}: {} rows x {} columns",
            table.rows.len(),
            table.columns.len()
        );
    }

    out
}

/// Next departure from every `day` table with a column matching `stop`.
pub(crate) fn render_departures(
    result: &ScrapeResult,
    stop: &str,
    day: DayType,
    now: NaiveTime,
) -> String {
    let mut out = String::new();
    let mut matched = false;

    for (key, table) in result.schedules_for(day) {
        let Some(column) = table.find_column(stop) else {
            continue;
        };
        matched = true;
        match table.next_departure(column, now) {
            Some(departure) => {
                let _ = writeln!(
                    out,
                    "{key} @ {column}: {} (in {} min)",
                    departure.time, departure.wait_minutes
                );
            }
            None => {
                let _ = writeln!(out, "{key} @ {column}: no listed departures");
            }
        }
    }

    if !matched {
        let _ = writeln!(out, "No {day} schedule lists a stop matching \"{stop}\"");
    }

    out
}
