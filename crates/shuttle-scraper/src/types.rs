//! Output types for one scrape of the shuttle page.
//!
//! Maps are `BTreeMap` so that two scrapes of identical markup produce
//! identical (and identically serialized) results.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveTime, Weekday};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::timetable::{next_departure, Departure};

/// A shuttle line as described on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// Route code from the known set (`"A"`, `"AB"`, `"PTC"`, `"Mill19"`, ...).
    pub code: String,
    pub description: String,
    /// Stop sequence as printed, e.g. `"Forbes > Morewood"`.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    #[must_use]
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    /// Day type of the current local date.
    #[must_use]
    pub fn today() -> Self {
        Self::from_weekday(chrono::Local::now().weekday())
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Weekend => write!(f, "Weekend"),
        }
    }
}

/// One cell of a timetable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub stop: String,
    pub time: String,
}

/// One timetable row: the times at each stop, in column order.
///
/// Blank cells are not stored, so a row may cover fewer stops than the
/// table has columns. Serializes as an object keyed by stop name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRow {
    pub stops: Vec<StopTime>,
}

impl ScheduleRow {
    #[must_use]
    pub fn get(&self, stop: &str) -> Option<&str> {
        self.stops
            .iter()
            .find(|cell| cell.stop == stop)
            .map(|cell| cell.time.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl Serialize for ScheduleRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stops.len()))?;
        for cell in &self.stops {
            map.serialize_entry(&cell.stop, &cell.time)?;
        }
        map.end()
    }
}

/// A timetable for one route group and day type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTable {
    /// Route group, e.g. `"A_B_AB"`, or `"Table_{n}"` when unclassified.
    pub group: String,
    pub day: DayType,
    /// Header stop names in source order.
    pub columns: Vec<String>,
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleTable {
    /// Key used in [`ScrapeResult::schedules`], e.g. `"A_Weekday"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.group, self.day)
    }

    /// Times listed under `stop`, top to bottom, skipping blank cells.
    #[must_use]
    pub fn times_at(&self, stop: &str) -> Vec<&str> {
        self.rows.iter().filter_map(|row| row.get(stop)).collect()
    }

    /// First column whose name contains `query`, ignoring case.
    #[must_use]
    pub fn find_column(&self, query: &str) -> Option<&str> {
        let needle = query.to_lowercase();
        self.columns
            .iter()
            .find(|column| column.to_lowercase().contains(&needle))
            .map(String::as_str)
    }

    /// Next departure from `stop` after `now`, wrapping to the first
    /// departure of the next day.
    #[must_use]
    pub fn next_departure(&self, stop: &str, now: NaiveTime) -> Option<Departure> {
        next_departure(now, self.times_at(stop))
    }
}

/// Result of one scrape of the schedule page.
///
/// A failed scrape (`success == false`) always has empty `routes` and
/// `schedules`; it is never partially filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    pub success: bool,
    pub routes: BTreeMap<String, RouteInfo>,
    pub schedules: BTreeMap<String, ScheduleTable>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResult {
    #[must_use]
    pub fn success(
        url: &str,
        routes: BTreeMap<String, RouteInfo>,
        schedules: BTreeMap<String, ScheduleTable>,
    ) -> Self {
        Self {
            success: true,
            routes,
            schedules,
            url: url.to_owned(),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(url: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            routes: BTreeMap::new(),
            schedules: BTreeMap::new(),
            url: url.to_owned(),
            error: Some(error.into()),
        }
    }

    /// Tables that run on `day`, in key order.
    #[must_use]
    pub fn schedules_for(&self, day: DayType) -> impl Iterator<Item = (&str, &ScheduleTable)> {
        self.schedules
            .iter()
            .filter(move |(_, table)| table.day == day)
            .map(|(key, table)| (key.as_str(), table))
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
