//! Per-site headline link extraction.
//!
//! Every supported site family gets one submodule encoding its markup shape,
//! and [`ExtractorKind`] is the tagged dispatch over those strategies. The
//! variant is picked once per site when the configuration is deserialized,
//! not re-derived from URLs at scrape time.
//!
//! Extraction is lossy by policy: markup missing the expected container
//! yields an empty list, so a site that changed its layout degrades only its
//! own contribution to the digest.

pub mod aftonbladet;
pub mod epochtimes;
pub mod expressen;
pub mod guardian;
pub mod svt;

use scraper::Html;
use serde::Deserialize;

/// Headline links kept per site. Applied after extraction and before URL
/// resolution, preserving document order.
pub const MAX_HEADLINES: usize = 10;

/// Markup strategy for locating headline links on a site's listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    Guardian,
    Aftonbladet,
    Expressen,
    EpochTimes,
    Svt,
}

impl ExtractorKind {
    /// Extract up to [`MAX_HEADLINES`] raw link strings from listing-page
    /// markup, in document order. Links may be relative; resolution is the
    /// caller's concern.
    pub fn extract(&self, markup: &str) -> Vec<String> {
        let document = Html::parse_document(markup);
        let mut links = match self {
            Self::Guardian => guardian::extract_links(&document),
            Self::Aftonbladet => aftonbladet::extract_links(&document),
            Self::Expressen => expressen::extract_links(&document),
            Self::EpochTimes => epochtimes::extract_links(&document),
            Self::Svt => svt::extract_links(&document),
        };
        links.truncate(MAX_HEADLINES);
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guardian_markup(count: usize) -> String {
        let anchors: String = (0..count)
            .map(|i| format!(r##"<a href="/world/story-{i}">Story {i}</a>"##))
            .collect();
        format!(
            r#"<html><body>
            <div id="container-latest-news">{anchors}</div>
            <div id="other"><a href="/ignored">x</a></div>
            </body></html>"#
        )
    }

    #[test]
    fn guardian_takes_anchors_inside_latest_news_container() {
        let links = ExtractorKind::Guardian.extract(&guardian_markup(3));
        assert_eq!(
            links,
            vec!["/world/story-0", "/world/story-1", "/world/story-2"]
        );
    }

    #[test]
    fn extraction_caps_at_ten_links_in_document_order() {
        let links = ExtractorKind::Guardian.extract(&guardian_markup(14));
        assert_eq!(links.len(), MAX_HEADLINES);
        assert_eq!(links[0], "/world/story-0");
        assert_eq!(links[9], "/world/story-9");
    }

    #[test]
    fn aftonbladet_takes_only_internal_link_anchors_in_main_section() {
        let markup = r#"<html><body>
        <section class="twocolumnlayout-main_3bf5">
            <a data-test-tag="internal-link" href="/nyheter/a">A</a>
            <a href="/nyheter/untagged">untagged</a>
            <a data-test-tag="internal-link" href="https://www.aftonbladet.se/nyheter/b">B</a>
        </section>
        <a data-test-tag="internal-link" href="/outside">outside</a>
        </body></html>"#;
        let links = ExtractorKind::Aftonbladet.extract(markup);
        assert_eq!(links, vec!["/nyheter/a", "https://www.aftonbladet.se/nyheter/b"]);
    }

    #[test]
    fn expressen_takes_first_anchor_of_each_teaser() {
        let markup = r#"<html><body>
        <div class="teaser">
            <a href="/nyheter/1">first</a>
            <a href="/nyheter/1-related">related</a>
        </div>
        <div class="teaser"><a href="/nyheter/2">second</a></div>
        <div class="teaser"><span>no anchor here</span></div>
        </body></html>"#;
        let links = ExtractorKind::Expressen.extract(markup);
        assert_eq!(links, vec!["/nyheter/1", "/nyheter/2"]);
    }

    #[test]
    fn epochtimes_takes_first_anchor_of_each_group_item() {
        let markup = r#"<html><body>
        <article class="groupItem"><h2><a href="/artikel/a">A</a></h2></article>
        <article class="groupItem"><a href="/artikel/b">B</a><a href="/artikel/b2">B2</a></article>
        <article class="other"><a href="/artikel/skip">skip</a></article>
        </body></html>"#;
        let links = ExtractorKind::EpochTimes.extract(markup);
        assert_eq!(links, vec!["/artikel/a", "/artikel/b"]);
    }

    #[test]
    fn svt_takes_anchor_of_each_list_item_in_latest_news() {
        let markup = r#"<html><body>
        <div class="LatestNews__contentWrapper___gBmEV">
            <ul>
                <li class="LatestNewsItem__root___iB1de"><a href="/nyheter/1">1</a></li>
                <li class="LatestNewsItem__root___iB1de"><a href="/nyheter/2">2</a></li>
                <li class="unrelated"><a href="/nyheter/skip">skip</a></li>
            </ul>
        </div>
        </body></html>"#;
        let links = ExtractorKind::Svt.extract(markup);
        assert_eq!(links, vec!["/nyheter/1", "/nyheter/2"]);
    }

    #[test]
    fn missing_container_yields_empty_not_panic() {
        let markup = "<html><body><p>nothing recognizable</p></body></html>";
        for kind in [
            ExtractorKind::Guardian,
            ExtractorKind::Aftonbladet,
            ExtractorKind::Expressen,
            ExtractorKind::EpochTimes,
            ExtractorKind::Svt,
        ] {
            assert!(kind.extract(markup).is_empty(), "{kind:?} should be empty");
        }
    }

    #[test]
    fn empty_markup_yields_empty() {
        assert!(ExtractorKind::Guardian.extract("").is_empty());
    }
}
