//! The per-run orchestration loop.
//!
//! Sites are walked in configuration order; within a site, articles are
//! analyzed a few at a time but their results land in extraction order, so
//! the digest layout is deterministic regardless of completion order. A
//! failed fetch or analysis becomes that article's `ERROR:` entry and the
//! loop keeps going; only report delivery can fail the run.

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, instrument, warn};

use crate::backend::CompletionBackend;
use crate::dispatch::ReportDispatcher;
use crate::error::{ArticleFailure, DeliveryError};
use crate::fetch::{self, PageFetcher};
use crate::models::{Report, Site};
use crate::report;
use crate::resolve::resolve;
use crate::summarize::Summarizer;
use crate::utils::truncate_for_log;

/// Articles in flight at once within one site. `buffered` (not
/// `buffer_unordered`) keeps completions in submission order.
const PARALLEL_ARTICLES: usize = 4;

/// One digest run: extraction, analysis, assembly, delivery.
pub struct Pipeline<F, B, D> {
    fetcher: F,
    summarizer: Summarizer<B>,
    dispatcher: D,
    sites: Vec<Site>,
}

impl<F, B, D> Pipeline<F, B, D>
where
    F: PageFetcher,
    B: CompletionBackend,
    D: ReportDispatcher,
{
    pub fn new(fetcher: F, summarizer: Summarizer<B>, dispatcher: D, sites: Vec<Site>) -> Self {
        Self {
            fetcher,
            summarizer,
            dispatcher,
            sites,
        }
    }

    /// Drive the whole run and hand the assembled report to the dispatcher
    /// exactly once. All analyses are produced before delivery is attempted,
    /// so a delivery failure loses nothing but the handoff.
    #[instrument(level = "info", skip_all)]
    pub async fn run(&self) -> Result<Report, DeliveryError> {
        let mut entries = Vec::new();
        for site in &self.sites {
            entries.extend(self.process_site(site).await);
        }

        let report = report::assemble(&entries);
        info!(
            entries = entries.len(),
            body_bytes = report.body.len(),
            "report assembled"
        );

        self.dispatcher.deliver(&report.subject, &report.body).await?;
        Ok(report)
    }

    /// Extract this site's headlines and analyze each one. Every resolved
    /// link yields exactly one entry.
    #[instrument(level = "info", skip_all, fields(site = %site.name))]
    async fn process_site(&self, site: &Site) -> Vec<String> {
        let markup = match self.fetcher.fetch_page(&site.url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!(url = %site.url, error = %e, "listing page fetch failed; skipping site");
                return Vec::new();
            }
        };

        let links = site.extractor.extract(&markup);
        info!(count = links.len(), "extracted headline links");

        let urls: Vec<String> = links.iter().map(|link| resolve(link, &site.url)).collect();
        let language = site.language.as_deref();

        stream::iter(urls)
            .map(|url| async move {
                match self.process_article(&url, language).await {
                    Ok(analysis) => {
                        debug!(
                            %url,
                            preview = %truncate_for_log(&analysis, 160),
                            "analysis recorded"
                        );
                        report::analysis_entry(&url, &analysis)
                    }
                    Err(e) => {
                        error!(%url, error = %e, "article failed; recording error entry");
                        report::failure_entry(&url, &e)
                    }
                }
            })
            .buffered(PARALLEL_ARTICLES)
            .collect()
            .await
    }

    /// Fetch one article and run it through the model.
    async fn process_article(
        &self,
        url: &str,
        language: Option<&str>,
    ) -> Result<String, ArticleFailure> {
        let article = fetch::fetch_article(&self.fetcher, url, language).await?;
        let analysis = self.summarizer.summarize(&article).await?;
        Ok(analysis)
    }
}
