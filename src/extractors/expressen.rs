//! Expressen: one headline per teaser block.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static TEASER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.teaser").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// The first anchor of each `div.teaser`. Teasers without an anchor are
/// skipped.
pub fn extract_links(document: &Html) -> Vec<String> {
    document
        .select(&TEASER)
        .filter_map(|teaser| teaser.select(&ANCHOR).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}
