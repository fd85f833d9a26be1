//! Markup parsing and the small element/text helpers shared by the
//! route and schedule extractors.

use scraper::{ElementRef, Html};

use crate::error::ScraperError;

/// Tags treated as section headings when walking the page.
pub(crate) const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Parses raw markup into a queryable document tree.
///
/// The HTML5 parser recovers from nearly anything, so only input with no
/// markup at all is rejected.
///
/// # Errors
///
/// Returns [`ScraperError::Parse`] when `markup` is blank or contains no tags.
pub fn parse_document(markup: &str) -> Result<Html, ScraperError> {
    if markup.trim().is_empty() {
        return Err(ScraperError::Parse {
            reason: "document is empty".to_owned(),
        });
    }
    if !markup.contains('<') {
        return Err(ScraperError::Parse {
            reason: "document contains no markup".to_owned(),
        });
    }

    let document = Html::parse_document(markup);
    if !document.errors.is_empty() {
        tracing::debug!(
            recovered = document.errors.len(),
            "schedule page parsed with recoverable markup errors"
        );
    }
    Ok(document)
}

/// Returns the element's text content with whitespace runs collapsed to a
/// single space and the ends trimmed.
///
/// Text nodes are joined with a space so `North<br>Oakland` reads as two words.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn is_heading_tag(name: &str) -> bool {
    HEADING_TAGS.contains(&name)
}

/// `1` for `h1` through `6` for `h6`; `None` for anything else.
pub(crate) fn heading_level(name: &str) -> Option<u8> {
    HEADING_TAGS
        .iter()
        .zip(1u8..)
        .find_map(|(tag, level)| (*tag == name).then_some(level))
}

/// `true` if a `<table>` sits anywhere below `element`.
pub(crate) fn contains_table(element: ElementRef<'_>) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|descendant| descendant.value().name() == "table")
}

/// `true` if `element` sits inside a timetable.
///
/// Layout tables, which wrap further tables, are ignored so headings laid
/// out in their cells still count as page text.
pub(crate) fn inside_timetable(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "table" && !contains_table(ancestor))
}
