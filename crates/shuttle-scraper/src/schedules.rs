//! Timetable extraction.
//!
//! Each `<table>` is flattened into a [`ScheduleTable`]: the header row
//! gives the stop names, every later row becomes one [`ScheduleRow`]. The
//! table is then classified from the title rows above its header, its
//! caption, and the headings just before it, nearest first.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::document::{contains_table, element_text, heading_level, inside_timetable};
use crate::rules::{classify_day, classify_day_keyword, match_schedule_group};
use crate::types::{ScheduleRow, ScheduleTable, StopTime};

static CONTEXT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, strong, b, p, dt, table").expect("valid selector")
});

/// Preceding texts inspected when looking for a table's route group and day.
const MAX_CONTEXT_HEADINGS: usize = 6;

/// Upper bound on `colspan` so a malformed attribute cannot blow up a row.
const MAX_COLSPAN: usize = 32;

/// A table's contents before classification.
struct ParsedTable {
    /// Texts of rows above the header (e.g. a spanning "Monday - Friday"
    /// banner), nearest to the header first.
    titles: Vec<String>,
    columns: Vec<String>,
    rows: Vec<ScheduleRow>,
}

/// Extracts every timetable with a header row, keyed by
/// [`ScheduleTable::key`].
///
/// Tables without a header are skipped. When two tables classify to the
/// same key, the later one replaces the earlier.
#[must_use]
pub fn extract_schedules(document: &Html) -> BTreeMap<String, ScheduleTable> {
    let items: Vec<ElementRef<'_>> = document
        .select(&CONTEXT_SELECTOR)
        .filter(|el| el.value().name() == "table" || !inside_timetable(*el))
        .collect();

    let mut schedules = BTreeMap::new();
    let mut table_index = 0usize;

    for (pos, item) in items.iter().enumerate() {
        if item.value().name() != "table" {
            continue;
        }
        let index = table_index;
        table_index += 1;

        if contains_table(*item) {
            tracing::debug!(index, "skipping layout table");
            continue;
        }
        let Some(parsed) = parse_table(*item) else {
            tracing::debug!(index, "skipping table without a header row");
            continue;
        };

        let (group, context) = table_context(*item, parsed.titles, &items[..pos]);
        let day = classify_day(context.iter().map(String::as_str));
        let group = group.map_or_else(|| format!("Table_{index}"), str::to_owned);

        let table = ScheduleTable {
            group,
            day,
            columns: parsed.columns,
            rows: parsed.rows,
        };

        let key = table.key();
        if schedules.contains_key(&key) {
            tracing::debug!(index, key = %key, "replacing earlier table with the same key");
        }
        schedules.insert(key, table);
    }

    schedules
}

/// Collects the texts describing a table, nearest first.
///
/// Order: title rows, caption, then preceding headings. The walk never
/// crosses an earlier timetable. It ends once both a route group and a day
/// keyword have been seen. After the group is found only enclosing section
/// headings are read: each must outrank the last, so a sibling section's
/// heading ends the walk.
fn table_context(
    table: ElementRef<'_>,
    titles: Vec<String>,
    preceding: &[ElementRef<'_>],
) -> (Option<&'static str>, Vec<String>) {
    let mut texts = Vec::new();
    let mut group = None;
    let mut has_day = false;

    let caption = table
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == "caption")
        .map(element_text)
        .filter(|text| !text.is_empty());

    for text in titles.into_iter().chain(caption) {
        has_day |= classify_day_keyword(&text).is_some();
        group = group.or_else(|| match_schedule_group(&text));
        texts.push(text);
        if group.is_some() && has_day {
            return (group, texts);
        }
    }

    // Heading level a further heading must outrank once the group is known.
    let mut section_bound: u8 = 7;
    let mut inspected = 0;
    for element in preceding.iter().rev() {
        let name = element.value().name();
        if name == "table" {
            if contains_table(*element) {
                continue;
            }
            break;
        }

        let level = heading_level(name);
        if group.is_some() {
            match level {
                Some(level) if level < section_bound => section_bound = level,
                Some(_) => break,
                None => continue,
            }
        }

        let text = element_text(*element);
        if text.is_empty() {
            continue;
        }

        has_day |= classify_day_keyword(&text).is_some();
        if group.is_none() {
            group = match_schedule_group(&text);
            if group.is_some() {
                section_bound = level.unwrap_or(section_bound);
            }
        }
        texts.push(text);
        if group.is_some() && has_day {
            break;
        }

        inspected += 1;
        if inspected >= MAX_CONTEXT_HEADINGS {
            break;
        }
    }

    (group, texts)
}

fn parse_table(table: ElementRef<'_>) -> Option<ParsedTable> {
    let rows = own_rows(table);
    let header_pos = find_header(&rows)?;

    let columns = column_names(rows[header_pos]);
    if columns.is_empty() {
        return None;
    }

    let titles = rows[..header_pos]
        .iter()
        .rev()
        .map(|row| distinct_labels(*row).join(" "))
        .filter(|text| !text.is_empty())
        .collect();

    let body = rows[header_pos + 1..]
        .iter()
        .filter_map(|row| build_row(*row, &columns))
        .collect();

    Some(ParsedTable {
        titles,
        columns,
        rows: body,
    })
}

/// Picks the header row: among `<thead>` rows (or, without a `<thead>`,
/// rows holding `<th>` cells), the first naming at least two distinct
/// stops, falling back to the first such row.
fn find_header(rows: &[ElementRef<'_>]) -> Option<usize> {
    let has_thead = rows.iter().any(|row| in_thead(*row));

    let candidates: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            if has_thead {
                in_thead(**row)
            } else {
                row_cells(**row).any(|cell| cell.value().name() == "th")
            }
        })
        .map(|(i, _)| i)
        .collect();

    candidates
        .iter()
        .copied()
        .find(|&i| distinct_labels(rows[i]).len() >= 2)
        .or_else(|| candidates.first().copied())
}

/// Rows belonging to `table` itself, directly or through its row groups.
/// Rows of nested tables are left out.
fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|row| row.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn in_thead(row: ElementRef<'_>) -> bool {
    row.parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|parent| parent.value().name() == "thead")
}

/// Header stop names, expanded by `colspan`.
///
/// Blank names become `column_{n}` and repeats get `.1`, `.2`, ... suffixes.
/// Returns an empty list when every header cell is blank.
fn column_names(header: ElementRef<'_>) -> Vec<String> {
    let raw = expanded_cells(header);
    if raw.iter().all(|(_, text)| text.is_empty()) {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, (_, text))| {
            let base = if text.is_empty() {
                format!("column_{}", i + 1)
            } else {
                text
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            name
        })
        .collect()
}

/// One record per data row; rows of only `<th>` cells (repeated headers)
/// and rows with no non-blank cell yield `None`.
fn build_row(row: ElementRef<'_>, columns: &[String]) -> Option<ScheduleRow> {
    let cells = expanded_cells(row);
    if cells.is_empty() || cells.iter().all(|(is_header, _)| *is_header) {
        return None;
    }

    let stops: Vec<StopTime> = columns
        .iter()
        .zip(cells)
        .filter(|(_, (_, text))| !text.is_empty())
        .map(|(column, (_, text))| StopTime {
            stop: column.clone(),
            time: text,
        })
        .collect();

    let row = ScheduleRow { stops };
    (!row.is_empty()).then_some(row)
}

/// Non-blank cell texts of a row, first occurrence only.
fn distinct_labels(row: ElementRef<'_>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for cell in row_cells(row) {
        let text = element_text(cell);
        if !text.is_empty() && !labels.contains(&text) {
            labels.push(text);
        }
    }
    labels
}

fn row_cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
}

/// `(is_th, text)` per column position, repeating cells that span columns.
fn expanded_cells(row: ElementRef<'_>) -> Vec<(bool, String)> {
    let mut cells = Vec::new();
    for cell in row_cells(row) {
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);
        let is_header = cell.value().name() == "th";
        let text = element_text(cell);
        for _ in 0..span {
            cells.push((is_header, text.clone()));
        }
    }
    cells
}

#[cfg(test)]
#[path = "schedules_test.rs"]
mod tests;
