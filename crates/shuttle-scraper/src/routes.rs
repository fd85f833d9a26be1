//! Route-description extraction.
//!
//! A route block is a heading matched by [`match_route_heading`] followed
//! by loose text: usually a description line and a stop path such as
//! `"Forbes > Morewood > Fifth"`. The block ends at the next heading tag,
//! table, or route heading.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::document::{
    collapse_whitespace, contains_table, element_text, inside_timetable, is_heading_tag,
};
use crate::rules::match_route_heading;
use crate::types::RouteInfo;

static CANDIDATE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, strong, b, p, dt").expect("valid selector")
});

/// Text blocks read after a heading before giving up on a path.
const MAX_DETAIL_BLOCKS: usize = 3;

/// Extracts every route block on the page, keyed by route code.
///
/// Best-effort: a heading without description or path text still yields an
/// entry with empty strings. Later headings for the same code replace
/// earlier ones.
#[must_use]
pub fn extract_routes(document: &Html) -> BTreeMap<String, RouteInfo> {
    let mut routes = BTreeMap::new();
    let mut anchors = HashSet::new();

    for candidate in document.select(&CANDIDATE_SELECTOR) {
        // Inline headings inside an already-handled block belong to it.
        if candidate.ancestors().any(|node| anchors.contains(&node.id())) {
            continue;
        }
        if inside_timetable(candidate) {
            continue;
        }

        let text = element_text(candidate);
        let Some(heading) = match_route_heading(&text) else {
            continue;
        };

        let anchor = block_anchor(candidate, &text);
        if !anchors.insert(anchor.id()) {
            continue;
        }

        let (sibling_description, path) = match read_details(anchor) {
            Some(details) => details,
            None if heading.inline_description.is_some() => (String::new(), String::new()),
            None => {
                tracing::debug!(code = heading.code, "route heading captions a timetable; skipping");
                continue;
            }
        };
        let description = heading.inline_description.unwrap_or(sibling_description);

        if routes.contains_key(heading.code) {
            tracing::debug!(code = heading.code, "route heading repeated; keeping the later one");
        }
        routes.insert(
            heading.code.to_owned(),
            RouteInfo {
                code: heading.code.to_owned(),
                description,
                path,
            },
        );
    }

    routes
}

/// Climbs from an inline heading (`<b>A Route</b>`) to the block that
/// holds nothing else, so sibling traversal starts at block level.
fn block_anchor<'a>(element: ElementRef<'a>, text: &str) -> ElementRef<'a> {
    let mut anchor = element;
    while let Some(parent) = anchor.parent().and_then(ElementRef::wrap) {
        if matches!(parent.value().name(), "body" | "html") || element_text(parent) != text {
            break;
        }
        anchor = parent;
    }
    anchor
}

/// Reads `(description, path)` from the nodes following `anchor`.
///
/// The first block containing `>` is the path; the first block before it
/// is the description. Returns `None` when a table follows the heading
/// with no text in between: that heading captions a timetable.
fn read_details(anchor: ElementRef<'_>) -> Option<(String, String)> {
    let mut description = String::new();
    let mut path = String::new();
    let mut blocks = 0;

    for node in anchor.next_siblings() {
        let text = if let Some(element) = ElementRef::wrap(node) {
            if ends_route_block(element) {
                if description.is_empty() && path.is_empty() && holds_table(element) {
                    return None;
                }
                break;
            }
            element_text(element)
        } else if let Some(text) = node.value().as_text() {
            collapse_whitespace(text)
        } else {
            continue;
        };

        let text = text
            .trim_start_matches(['-', '–', '—', ':', ' '])
            .to_owned();
        if text.is_empty() {
            continue;
        }

        if text.contains('>') {
            path = text;
            break;
        }
        if description.is_empty() {
            description = text;
        }

        blocks += 1;
        if blocks >= MAX_DETAIL_BLOCKS {
            break;
        }
    }

    Some((description, path))
}

fn ends_route_block(element: ElementRef<'_>) -> bool {
    is_heading_tag(element.value().name())
        || holds_table(element)
        || match_route_heading(&element_text(element)).is_some()
}

fn holds_table(element: ElementRef<'_>) -> bool {
    element.value().name() == "table" || contains_table(element)
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
