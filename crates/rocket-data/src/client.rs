//! JSON fetch client with dependency tagging.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::dependency::DependencyTag;
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout after {elapsed_ms}ms for {url}")]
    Timeout { elapsed_ms: u128, url: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Check if this is a 404 from the remote.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Check if a later attempt could succeed: 5xx, timeout or connection failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => (500..600).contains(status),
            Self::Timeout { .. } | Self::Connection(_) => true,
            _ => false,
        }
    }
}

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Create from a dependency tag's defaults.
    pub fn from_tag(tag: DependencyTag) -> Self {
        PolicyOverrides::default().apply(tag)
    }
}

/// Caller overrides layered over a tag's defaults. Unset fields keep the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    /// Per-attempt timeout.
    pub timeout: Option<Duration>,
    /// Retries after the first attempt.
    pub max_retries: Option<u32>,
}

impl PolicyOverrides {
    /// Effective policy for `tag`.
    pub fn apply(&self, tag: DependencyTag) -> FetchPolicy {
        let timeout = self.timeout.unwrap_or_else(|| tag.default_timeout());
        let retry = match self.max_retries.unwrap_or_else(|| tag.default_max_retries()) {
            0 => RetryPolicy::none(),
            n => RetryPolicy::new(n),
        };
        FetchPolicy::new(TimeoutConfig::from_total(timeout), retry)
    }
}

/// JSON fetch client bound to a base URL.
///
/// Provides automatic timeout, retry, and logging for outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    overrides: PolicyOverrides,
}

impl FetchClient {
    /// Create a new fetch client for `base_url` (e.g. `http://localhost:3333`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let parsed =
            reqwest::Url::parse(&base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(TimeoutConfig::default().connect)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            overrides: PolicyOverrides::default(),
        })
    }

    /// Override parts of the per-tag policy for all fetches.
    pub fn with_overrides(mut self, overrides: PolicyOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch with automatic timeout and retry based on dependency tag.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        tag: DependencyTag,
    ) -> Result<T, FetchError> {
        let policy = self.overrides.apply(tag);
        self.fetch_with_policy(path, tag, &policy).await
    }

    /// Fetch with explicit policy override.
    pub async fn fetch_with_policy<T: DeserializeOwned>(
        &self,
        path: &str,
        tag: DependencyTag,
        policy: &FetchPolicy,
    ) -> Result<T, FetchError> {
        let url = join_url(&self.base_url, path);
        let mut attempt = 0;

        loop {
            let started = std::time::Instant::now();
            let result = match tokio::time::timeout(policy.timeout.total, self.fetch_once(&url)).await
            {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout {
                    elapsed_ms: started.elapsed().as_millis(),
                    url: url.clone(),
                }),
            };

            let error = match result {
                Ok(value) => {
                    tracing::debug!(
                        dependency = %tag,
                        %url,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "fetch ok"
                    );
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !policy.retry.should_retry(&error, attempt) {
                tracing::debug!(dependency = %tag, %url, %error, attempt, "fetch failed");
                return Err(error);
            }

            let delay = policy.retry.backoff.delay(attempt);
            tracing::debug!(dependency = %tag, %url, attempt, ?delay, "retrying fetch");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self.http.get(url).send().await.map_err(map_reqwest_error)?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_connect() {
        FetchError::Connection(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

/// Join a base URL and a path with exactly one slash between them.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
