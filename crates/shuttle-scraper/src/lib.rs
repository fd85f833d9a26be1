pub mod client;
pub mod document;
pub mod error;
pub mod routes;
pub mod rules;
pub mod schedules;
pub mod scrape;
pub mod timetable;
pub mod types;

pub use client::ShuttleClient;
pub use error::ScraperError;
pub use scrape::ShuttleScraper;
pub use timetable::{next_departure, parse_clock_time, Departure};
pub use types::{DayType, RouteInfo, ScheduleRow, ScheduleTable, ScrapeResult, StopTime};
