//! SVT: list items inside the latest-news wrapper.
//!
//! The class names are build artifacts of SVT's frontend pipeline and change
//! when they ship a new bundle; when that happens this extractor goes quiet
//! rather than failing the run.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static CONTENT_WRAPPER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.LatestNews__contentWrapper___gBmEV").unwrap());
static LIST_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.LatestNewsItem__root___iB1de").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// The anchor of each latest-news list item within the content wrapper.
pub fn extract_links(document: &Html) -> Vec<String> {
    let Some(wrapper) = document.select(&CONTENT_WRAPPER).next() else {
        return Vec::new();
    };
    wrapper
        .select(&LIST_ITEM)
        .filter_map(|item| item.select(&ANCHOR).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}
