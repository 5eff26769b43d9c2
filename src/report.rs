//! Digest assembly: per-article entries and the final report.

use std::fmt::Display;

use crate::models::Report;

/// Subject line used for every digest.
pub const SUBJECT: &str = "Latest News Headlines and Analysis";

const INTRO: &str = "Here are the latest headlines and their analyses:";

/// Entry for an article that produced an analysis.
pub fn analysis_entry(url: &str, analysis: &str) -> String {
    format!("Article: {url}\nAnalysis:\n{analysis}\n\n")
}

/// Entry for an article whose fetch or analysis failed. The marker keeps the
/// failure visible to the digest reader instead of dropping the article.
pub fn failure_entry(url: &str, reason: &impl Display) -> String {
    format!("Article: {url}\nAnalysis:\nERROR: {reason}\n\n")
}

/// Assemble the single report for this run. Entries arrive already ordered
/// site-then-link.
pub fn assemble(entries: &[String]) -> Report {
    Report {
        subject: SUBJECT.to_string(),
        body: format!("{INTRO}\n\n{}", entries.join("\n")),
    }
}
