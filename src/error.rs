//! Typed errors, one enum per failure domain.
//!
//! [`FetchError`] and [`BackendError`] are caught at per-article granularity
//! and rendered into the report body behind an `ERROR:` marker, so a single
//! bad article never aborts the run. [`DeliveryError`] is the run's final
//! status once all analyses have been produced.

use reqwest::StatusCode;
use thiserror::Error;

/// A network or HTTP failure while fetching a listing page or an article.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request itself failed (DNS, connect, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },
}

/// The completion backend returned a non-success or malformed response.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status; `body` carries the raw response text so the
    /// failure entry in the digest is self-explanatory.
    #[error("completion backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("completion response contained no choices")]
    Empty,
}

/// The assembled report could not be handed off for delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The message could not be built (bad mailbox, invalid header).
    #[error("could not build digest message: {0}")]
    Message(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The SMTP conversation failed.
    #[error("smtp delivery failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Configuration problems surfaced at startup, before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("openai_api_key is required when use_hosted_backend is true")]
    MissingApiKey,

    #[error("local_backend_base_url is required when use_hosted_backend is false")]
    MissingLocalUrl,
}

/// Why a single article produced no analysis. Rendered after the `ERROR:`
/// marker in that article's report entry.
#[derive(Debug, Error)]
pub enum ArticleFailure {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Backend(#[from] BackendError),
}
