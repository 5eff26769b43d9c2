//! # Daily News Digest
//!
//! Scrapes headline links from a fixed set of news sites, fetches each
//! linked article, produces a structured summary/analysis through a
//! text-completion backend, and emails the aggregated results as a single
//! plain-text digest.
//!
//! ## Architecture
//!
//! One run is a single pass through the pipeline:
//! 1. **Extraction**: per-site markup strategies pull up to 10 headline
//!    links from each listing page, in document order
//! 2. **Resolution**: relative links are normalized against the site's host
//! 3. **Analysis**: each article is fetched, reduced to plain text, and sent
//!    to the completion backend (hosted API or local endpoint)
//! 4. **Delivery**: one email carries every analysis, with per-article
//!    failures kept visible as `ERROR:` entries
//!
//! ## Usage
//!
//! ```sh
//! daily_news_digest --config config.yaml
//! ```

use std::error::Error;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod backend;
mod cli;
mod config;
mod dispatch;
mod error;
mod extractors;
mod fetch;
mod models;
mod pipeline;
mod report;
mod resolve;
mod summarize;
mod utils;

use backend::{Backend, Retry};
use cli::Cli;
use config::Config;
use dispatch::SmtpDispatcher;
use fetch::HttpFetcher;
use pipeline::Pipeline;
use summarize::Summarizer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(date = %Local::now().date_naive(), "news digest starting up");

    let args = Cli::parse();
    let config = Config::load(&args.config)?;
    info!(
        config_path = %args.config,
        sites = config.sites.len(),
        hosted_backend = config.use_hosted_backend,
        "loaded configuration"
    );

    let backend = Retry::new(Backend::from_config(&config)?, 5, Duration::from_secs(1));
    let summarizer = Summarizer::new(backend);
    let dispatcher = SmtpDispatcher::new(&config.smtp_host, &config.email, &config.app_password)?;
    let pipeline = Pipeline::new(HttpFetcher::new(), summarizer, dispatcher, config.sites);

    let result = pipeline.run().await;
    let elapsed = start_time.elapsed();

    match result {
        Ok(report) => {
            info!(
                ?elapsed,
                body_bytes = report.body.len(),
                "digest delivered"
            );
            Ok(())
        }
        Err(e) => {
            // Analyses were produced; only the handoff failed.
            error!(?elapsed, error = %e, "digest assembled but not delivered");
            Err(e.into())
        }
    }
}
