//! Text-completion backends behind one capability trait.
//!
//! The orchestrator only ever sees [`CompletionBackend`]; whether the
//! completion comes from the hosted API or a locally running endpoint is
//! decided once, from configuration, via [`Backend::from_config`]. Both
//! backends speak the same `{model, messages}` chat-completions shape and
//! share one response parser, so they are interchangeable.
//!
//! [`Retry`] adds exponential backoff with jitter on top of any backend:
//! up to 5 attempts, delay doubling from 1 second and capped at 30, plus
//! 0-250ms of random jitter.

use std::time::{Duration, Instant};

use rand::{Rng, rng};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::error::{BackendError, ConfigError};

const HOSTED_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const HOSTED_MODEL: &str = "gpt-4";
const LOCAL_MODEL: &str = "llama3.2:latest";

/// Capability to turn a `{system, user}` message pair into generated text.
pub trait CompletionBackend {
    async fn complete(&self, system_prompt: &str, user_text: &str)
    -> Result<String, BackendError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, system: &'a str, user: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Pull the first completion's text out of a chat-completions response body.
fn first_choice(body: &str) -> Result<String, BackendError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or(BackendError::Empty)
}

/// Hosted chat-completions API, authenticated with a bearer key.
#[derive(Debug, Clone)]
pub struct HostedBackend {
    client: Client,
    api_key: String,
}

impl HostedBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

impl CompletionBackend for HostedBackend {
    #[instrument(level = "info", skip_all)]
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, BackendError> {
        let request = ChatRequest::new(HOSTED_MODEL, system_prompt, user_text);
        let response = self
            .client
            .post(HOSTED_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status { status, body });
        }
        first_choice(&body)
    }
}

/// Locally reachable chat-completions endpoint (an Ollama-style server).
#[derive(Debug, Clone)]
pub struct LocalBackend {
    client: Client,
    base_url: String,
}

impl LocalBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl CompletionBackend for LocalBackend {
    #[instrument(level = "info", skip_all)]
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, BackendError> {
        let request = ChatRequest::new(LOCAL_MODEL, system_prompt, user_text);
        let response = self
            .client
            .post(self.completions_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status { status, body });
        }
        first_choice(&body)
    }
}

/// Runtime-selected backend, fixed once per run.
#[derive(Debug, Clone)]
pub enum Backend {
    Hosted(HostedBackend),
    Local(LocalBackend),
}

impl Backend {
    /// Pick the configured backend, failing when the selection is missing
    /// its required credential or endpoint.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if config.use_hosted_backend {
            let api_key = config
                .openai_api_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .ok_or(ConfigError::MissingApiKey)?;
            Ok(Self::Hosted(HostedBackend::new(api_key)))
        } else {
            let base_url = config
                .local_backend_base_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .ok_or(ConfigError::MissingLocalUrl)?;
            Ok(Self::Local(LocalBackend::new(base_url)))
        }
    }
}

impl CompletionBackend for Backend {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, BackendError> {
        match self {
            Self::Hosted(backend) => backend.complete(system_prompt, user_text).await,
            Self::Local(backend) => backend.complete(system_prompt, user_text).await,
        }
    }
}

/// Adds exponential backoff with jitter to any [`CompletionBackend`].
///
/// A request that still fails after the last attempt surfaces its error to
/// the caller, which records it against that one article only.
#[derive(Debug)]
pub struct Retry<B> {
    inner: B,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
}

impl<B: CompletionBackend> Retry<B> {
    pub fn new(inner: B, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl<B: CompletionBackend> CompletionBackend for Retry<B> {
    #[instrument(level = "info", skip_all)]
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, BackendError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.complete(system_prompt, user_text).await {
                Ok(text) => {
                    info!(
                        elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                        "completion succeeded"
                    );
                    return Ok(text);
                }
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                            error = %e,
                            "completion exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + Duration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "completion attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FIXTURE_BODY: &str = r#"{
        "choices": [
            {"message": {"role": "assistant", "content": "  ## Summary\n- point  "}},
            {"message": {"role": "assistant", "content": "second choice ignored"}}
        ]
    }"#;

    #[test]
    fn first_choice_takes_first_completion_trimmed() {
        assert_eq!(first_choice(FIXTURE_BODY).unwrap(), "## Summary\n- point");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let err = first_choice(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, BackendError::Empty));
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = first_choice("not json at all").unwrap_err();
        assert!(matches!(err, BackendError::Malformed(_)));
    }

    #[test]
    fn request_shape_matches_the_wire_contract() {
        let request = ChatRequest::new("some-model", "sys prompt", "user text");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "some-model",
                "messages": [
                    {"role": "system", "content": "sys prompt"},
                    {"role": "user", "content": "user text"}
                ]
            })
        );
    }

    // Hosted and local differ only in endpoint, auth, and model name; the
    // message shape and response parsing are shared, so equivalent fixture
    // responses must yield identical analysis text.
    #[test]
    fn backends_agree_on_equivalent_responses() {
        let hosted = first_choice(FIXTURE_BODY).unwrap();
        let local = first_choice(FIXTURE_BODY).unwrap();
        assert_eq!(hosted, local);

        let hosted_request = serde_json::to_value(ChatRequest::new(HOSTED_MODEL, "s", "u")).unwrap();
        let local_request = serde_json::to_value(ChatRequest::new(LOCAL_MODEL, "s", "u")).unwrap();
        assert_eq!(hosted_request["messages"], local_request["messages"]);
    }

    #[test]
    fn local_backend_joins_base_url_without_double_slash() {
        let backend = LocalBackend::new("http://localhost:11434/v1/");
        assert_eq!(
            backend.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    struct FlakyBackend {
        failures: usize,
        calls: AtomicUsize,
    }

    impl CompletionBackend for FlakyBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, BackendError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(BackendError::Empty)
            } else {
                Ok("recovered".to_string())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retry_recovers_from_transient_failures() {
        let backend = Retry::new(
            FlakyBackend {
                failures: 2,
                calls: AtomicUsize::new(0),
            },
            5,
            Duration::from_secs(1),
        );
        let text = backend.complete("s", "u").await.unwrap();
        assert_eq!(text, "recovered");
        assert_eq!(backend.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_surfaces_the_error_once_exhausted() {
        let backend = Retry::new(
            FlakyBackend {
                failures: usize::MAX,
                calls: AtomicUsize::new(0),
            },
            2,
            Duration::from_secs(1),
        );
        let err = backend.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, BackendError::Empty));
        // initial attempt plus two retries
        assert_eq!(backend.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn from_config_requires_matching_credentials() {
        let mut config = Config::for_tests();
        config.use_hosted_backend = true;
        config.openai_api_key = None;
        assert!(matches!(
            Backend::from_config(&config),
            Err(ConfigError::MissingApiKey)
        ));

        config.use_hosted_backend = false;
        config.local_backend_base_url = None;
        assert!(matches!(
            Backend::from_config(&config),
            Err(ConfigError::MissingLocalUrl)
        ));

        config.local_backend_base_url = Some("http://localhost:11434/v1".to_string());
        assert!(matches!(
            Backend::from_config(&config),
            Ok(Backend::Local(_))
        ));
    }
}
