//! Ordered keyword rules used to classify headings.
//!
//! Three rule sets live here:
//!
//! - [`ROUTE_RULES`] recognise a route-description heading such as
//!   `"A Route"` or `"PTC & Mill 19 Route - Hazelwood Green"`. The whole
//!   heading must be the route name, optionally followed by an inline
//!   description after `-`, `–`, `—`, or `:`.
//! - [`SCHEDULE_GROUP_RULES`] name the route group a timetable belongs to.
//!   These match anywhere in a heading (`"A, B and AB Routes - Monday - Friday"`).
//! - [`classify_day`] applies the weekend keywords before the weekday
//!   keywords, so a heading mentioning both is a weekend heading.
//!
//! Within each set the first matching rule wins, and rules are listed most
//! specific first: `Mill19` precedes `PTC`, `AB` precedes `A` and `B`.
//!
//! Route names are case-sensitive so single-letter codes do not match prose
//! like "find a route"; day keywords are case-insensitive.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::DayType;

/// A route-code rule: `name` is a regex fragment for the route's heading name.
pub struct RouteRule {
    pub code: &'static str,
    name: &'static str,
}

pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        code: "BakerySquare",
        name: r"Bakery\s+Square(?:\s+(?:Long|Short))?\s+Route",
    },
    RouteRule {
        code: "Mill19",
        name: r"(?:PTC\s*(?:&|and|/)\s*)?Mill\s*19\s+Route",
    },
    RouteRule {
        code: "PTC",
        name: r"PTC\s+Route",
    },
    RouteRule {
        code: "AB",
        name: r"AB\s+Route",
    },
    RouteRule {
        code: "A",
        name: r"A\s+Route",
    },
    RouteRule {
        code: "B",
        name: r"B\s+Route",
    },
    RouteRule {
        code: "C",
        name: r"C\s+Route",
    },
];

/// A timetable group rule; `group` becomes the prefix of the schedule key.
pub struct GroupRule {
    pub group: &'static str,
    pattern: &'static str,
}

pub const SCHEDULE_GROUP_RULES: &[GroupRule] = &[
    GroupRule {
        group: "A_B_AB",
        pattern: r"\bA\s*,\s*B\s*,?\s*(?:and|&)\s*AB\s+Routes?\b|\bA\s*/\s*B\s*/\s*AB\b",
    },
    GroupRule {
        group: "PTC_Mill19",
        pattern: r"\bPTC\s*(?:&|and|/)\s*Mill\s*19\b|\bMill\s*19\b",
    },
    GroupRule {
        group: "Bakery_Square",
        pattern: r"\bBakery\s+Square\b",
    },
    GroupRule {
        group: "PTC",
        pattern: r"\bPTC\b",
    },
    GroupRule {
        group: "AB",
        pattern: r"\bAB\s+Route\b",
    },
    GroupRule {
        group: "A",
        pattern: r"\bA\s+Route\b",
    },
    GroupRule {
        group: "B",
        pattern: r"\bB\s+Route\b",
    },
    GroupRule {
        group: "C",
        pattern: r"\bC\s+Route\b",
    },
];

static ROUTE_HEADING_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ROUTE_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(&format!(
                r"^(?:{})\s*(?:[-–—:]\s*(?P<desc>.*\S))?\s*$",
                rule.name
            ))
            .expect("valid route heading regex");
            (rule.code, re)
        })
        .collect()
});

static GROUP_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SCHEDULE_GROUP_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(rule.pattern).expect("valid group regex");
            (rule.group, re)
        })
        .collect()
});

static WEEKEND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:weekends?|saturdays?|sundays?|sat|sun)\b")
        .expect("valid weekend regex")
});

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:weekdays?|mondays?|fridays?)\b").expect("valid weekday regex")
});

/// A heading recognised as the start of a route description block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteHeading {
    pub code: &'static str,
    /// Description given on the heading line itself, if any.
    pub inline_description: Option<String>,
}

/// Matches a whole heading against [`ROUTE_RULES`].
///
/// Headings that carry a day keyword are timetable captions
/// (`"A Route - Monday - Friday"`) and never start a route block.
#[must_use]
pub fn match_route_heading(text: &str) -> Option<RouteHeading> {
    if classify_day_keyword(text).is_some() {
        return None;
    }
    ROUTE_HEADING_RES.iter().find_map(|(code, re)| {
        re.captures(text).map(|caps| RouteHeading {
            code: *code,
            inline_description: caps.name("desc").map(|m| m.as_str().to_owned()),
        })
    })
}

/// Returns the first [`SCHEDULE_GROUP_RULES`] group mentioned in `text`.
#[must_use]
pub fn match_schedule_group(text: &str) -> Option<&'static str> {
    GROUP_RES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(group, _)| *group)
}

/// Day type named by `text`, or `None` if it carries no day keyword.
#[must_use]
pub fn classify_day_keyword(text: &str) -> Option<DayType> {
    if WEEKEND_RE.is_match(text) {
        Some(DayType::Weekend)
    } else if WEEKDAY_RE.is_match(text) {
        Some(DayType::Weekday)
    } else {
        None
    }
}

/// Classifies a timetable from its context texts, nearest first.
///
/// The nearest text carrying a day keyword decides; with no keyword
/// anywhere the table is a weekday table.
#[must_use]
pub fn classify_day<'a, I>(texts: I) -> DayType
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .find_map(classify_day_keyword)
        .unwrap_or(DayType::Weekday)
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
