//! Core data types carried through one digest run.

use serde::Deserialize;

use crate::extractors::ExtractorKind;

/// One configured news site. The list is ordered and immutable for the run;
/// its order is the outer sort of the final report.
#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    /// Short identifier used in logs.
    pub name: String,
    /// Listing page whose markup is scanned for headline links. Also the
    /// base against which relative links are resolved.
    pub url: String,
    /// Which markup strategy locates headline links on this site.
    pub extractor: ExtractorKind,
    /// Source language when it is not English, e.g. `Swedish`. Forwarded to
    /// the model as a one-line note ahead of the instructions.
    #[serde(default)]
    pub language: Option<String>,
}

/// A fetched article reduced to plain text, ready for analysis. Consumed
/// once by the summarizer, then discarded.
#[derive(Debug)]
pub struct Article {
    pub url: String,
    pub text: String,
    /// Language hint inherited from the originating site.
    pub language: Option<String>,
}

/// The single aggregated digest produced once per run and handed to the
/// dispatcher. Discarded afterwards; no state survives the run.
#[derive(Debug)]
pub struct Report {
    pub subject: String,
    pub body: String,
}
