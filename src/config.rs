//! Run configuration, loaded once at startup and passed in explicitly.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::extractors::ExtractorKind;
use crate::models::Site;

/// Everything one digest run needs, read from a YAML file. Nothing here is
/// consulted through ambient globals; `main` threads it into the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Sending (and receiving) mailbox for the digest.
    pub email: String,
    /// App password for `email`.
    pub app_password: String,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// Use the hosted completion API instead of a local endpoint.
    pub use_hosted_backend: bool,
    /// Bearer key for the hosted backend.
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// Base URL of the local completion endpoint,
    /// e.g. `http://localhost:11434/v1`.
    #[serde(default)]
    pub local_backend_base_url: Option<String>,
    /// Ordered site list; defaults to the stock set below.
    #[serde(default = "default_sites")]
    pub sites: Vec<Site>,
}

impl Config {
    /// Read the configuration file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            email: "digest@example.com".to_string(),
            app_password: "hunter2".to_string(),
            smtp_host: default_smtp_host(),
            use_hosted_backend: true,
            openai_api_key: Some("sk-test".to_string()),
            local_backend_base_url: None,
            sites: Vec::new(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn site(name: &str, url: &str, extractor: ExtractorKind, language: Option<&str>) -> Site {
    Site {
        name: name.to_string(),
        url: url.to_string(),
        extractor,
        language: language.map(str::to_string),
    }
}

fn default_sites() -> Vec<Site> {
    vec![
        site(
            "guardian-world",
            "https://www.theguardian.com/world",
            ExtractorKind::Guardian,
            None,
        ),
        site(
            "guardian-europe",
            "https://www.theguardian.com/world/europe-news",
            ExtractorKind::Guardian,
            None,
        ),
        site(
            "aftonbladet",
            "https://www.aftonbladet.se",
            ExtractorKind::Aftonbladet,
            Some("Swedish"),
        ),
        site(
            "expressen",
            "https://www.expressen.se",
            ExtractorKind::Expressen,
            Some("Swedish"),
        ),
        site(
            "epochtimes",
            "https://www.epochtimes.se",
            ExtractorKind::EpochTimes,
            None,
        ),
        site("svt", "https://www.svt.se/", ExtractorKind::Svt, Some("Swedish")),
    ]
}
