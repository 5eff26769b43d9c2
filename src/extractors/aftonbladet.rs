//! Aftonbladet: internal-link anchors inside the two-column main section.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static MAIN_SECTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("section.twocolumnlayout-main_3bf5").unwrap());
static INTERNAL_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[data-test-tag="internal-link"]"#).unwrap());

/// Anchors tagged `data-test-tag="internal-link"` within the main section.
/// Links may be relative or already absolute; both are passed through as-is.
pub fn extract_links(document: &Html) -> Vec<String> {
    let Some(section) = document.select(&MAIN_SECTION).next() else {
        return Vec::new();
    };
    section
        .select(&INTERNAL_LINK)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}
