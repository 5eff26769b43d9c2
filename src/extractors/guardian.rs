//! The Guardian: the latest-news container carries plain anchors.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#container-latest-news").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Every anchor inside the `container-latest-news` div, in document order.
pub fn extract_links(document: &Html) -> Vec<String> {
    let Some(container) = document.select(&CONTAINER).next() else {
        return Vec::new();
    };
    container
        .select(&ANCHOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}
