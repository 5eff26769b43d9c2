//! Prompt construction and the per-article analysis step.

use tracing::instrument;

use crate::backend::CompletionBackend;
use crate::error::BackendError;
use crate::models::Article;

const INSTRUCTIONS: &str = "Read the following article and do two things:\n\
1. Summarize it from the perspective of what is best for ordinary people, avoiding political spin.\n\
2. Analyze why the politicians made their statements, considering party strategy, internal dynamics, and public opinion.\n\
Keep the answer structured with clear bullet points and headings.";

/// Builds the fixed instruction prompt and routes article text through the
/// injected completion backend.
#[derive(Debug)]
pub struct Summarizer<B> {
    backend: B,
}

impl<B: CompletionBackend> Summarizer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Produce the structured analysis for one article.
    #[instrument(level = "info", skip_all, fields(url = %article.url))]
    pub async fn summarize(&self, article: &Article) -> Result<String, BackendError> {
        let prompt = build_prompt(article.language.as_deref());
        self.backend.complete(&prompt, &article.text).await
    }
}

/// The instruction prompt, with a one-line language note prepended when the
/// source text is not English.
fn build_prompt(language: Option<&str>) -> String {
    match language {
        Some(language) => format!("This article is in {language}.\n{INSTRUCTIONS}"),
        None => INSTRUCTIONS.to_string(),
    }
}
