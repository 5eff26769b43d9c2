//! Epoch Times: one headline per article-like group item.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static GROUP_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("article.groupItem").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// The first anchor of each `article.groupItem`.
pub fn extract_links(document: &Html) -> Vec<String> {
    document
        .select(&GROUP_ITEM)
        .filter_map(|item| item.select(&ANCHOR).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}
