//! Page retrieval and article body-text extraction.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::error::FetchError;
use crate::models::Article;

/// Article text beyond this many characters is cut and marked; keeps the
/// model input bounded.
pub const ARTICLE_TEXT_CAP: usize = 10_000;

const TRUNCATION_MARKER: &str = "...";
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Capability to retrieve raw markup for a URL.
pub trait PageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// `reqwest`-backed fetcher shared across the whole run.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap();
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|source| {
            FetchError::Request {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}

/// Concatenate the trimmed visible text of every paragraph in document
/// order, joined by single spaces, capped at [`ARTICLE_TEXT_CAP`] characters
/// with a marker appended when the cap bites.
pub fn article_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut parts: Vec<String> = Vec::new();
    for paragraph in document.select(&PARAGRAPH) {
        let raw = paragraph.text().collect::<Vec<_>>().join(" ");
        let text = WHITESPACE.replace_all(raw.trim(), " ");
        if !text.is_empty() {
            parts.push(text.into_owned());
        }
    }

    let mut text = parts.join(" ");
    // char_indices keeps the cut on a UTF-8 boundary.
    if let Some((cut, _)) = text.char_indices().nth(ARTICLE_TEXT_CAP) {
        text.truncate(cut);
        text.push_str(TRUNCATION_MARKER);
    }
    text
}

/// Fetch a single article and reduce it to analyzable plain text. The
/// originating site's language hint travels with the article.
pub async fn fetch_article<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    language: Option<&str>,
) -> Result<Article, FetchError> {
    let markup = fetcher.fetch_page(url).await?;
    let text = article_text(&markup);
    debug!(%url, chars = text.chars().count(), "extracted article text");
    Ok(Article {
        url: url.to_string(),
        text,
        language: language.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_join_with_single_spaces_in_document_order() {
        let markup = "<html><body><p>A</p><p>B</p><p>C</p></body></html>";
        assert_eq!(article_text(markup), "A B C");
    }

    #[test]
    fn inner_whitespace_collapses_and_edges_trim() {
        let markup = "<html><body><p>  first\n   line </p><p>\tsecond</p></body></html>";
        assert_eq!(article_text(markup), "first line second");
    }

    #[test]
    fn non_paragraph_text_is_ignored() {
        let markup = "<html><body><div>chrome</div><p>body text</p><span>aside</span></body></html>";
        assert_eq!(article_text(markup), "body text");
    }

    #[test]
    fn empty_paragraphs_do_not_add_separators() {
        let markup = "<html><body><p>A</p><p>   </p><p>B</p></body></html>";
        assert_eq!(article_text(markup), "A B");
    }

    #[test]
    fn long_text_truncates_to_cap_plus_marker() {
        let long = "a".repeat(ARTICLE_TEXT_CAP + 50);
        let markup = format!("<html><body><p>{long}</p></body></html>");
        let text = article_text(&markup);
        assert_eq!(text.len(), ARTICLE_TEXT_CAP + TRUNCATION_MARKER.len());
        assert!(text.ends_with(TRUNCATION_MARKER));
        assert!(text[..ARTICLE_TEXT_CAP].chars().all(|c| c == 'a'));
    }

    #[test]
    fn text_at_cap_is_left_alone() {
        let exact = "b".repeat(ARTICLE_TEXT_CAP);
        let markup = format!("<html><body><p>{exact}</p></body></html>");
        let text = article_text(&markup);
        assert_eq!(text.len(), ARTICLE_TEXT_CAP);
        assert!(!text.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let long = "å".repeat(ARTICLE_TEXT_CAP + 10);
        let markup = format!("<html><body><p>{long}</p></body></html>");
        let text = article_text(&markup);
        assert_eq!(text.chars().count(), ARTICLE_TEXT_CAP + TRUNCATION_MARKER.len());
        assert!(text.ends_with(TRUNCATION_MARKER));
    }
}
