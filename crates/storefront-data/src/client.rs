//! The single-entry commerce API client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use serde::de::DeserializeOwned;
use storefront_core::StoreConfig;

use crate::cache::ResponseCache;
use crate::error::DataError;
use crate::policy::FetchPolicy;
use crate::response::GraphqlPayload;
use crate::retry::{retryable_status, RetryPolicy};

/// Header carrying the static storefront access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-shopify-storefront-access-token";

/// Per-attempt request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Transport settings for the client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Per-attempt timeout (not per logical operation).
    pub timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Executes GraphQL operations against the commerce API.
///
/// All catalog reads and cart mutations funnel through [`execute`]. The
/// client never throws an unhandled transport fault at its callers: every
/// call resolves to a decoded payload or a categorized [`DataError`].
///
/// [`execute`]: StorefrontClient::execute
pub struct StorefrontClient {
    endpoint: String,
    http: reqwest::Client,
    retry: RetryPolicy,
    cache: ResponseCache,
}

impl StorefrontClient {
    /// Create a client with default transport settings.
    pub fn new(config: &StoreConfig) -> Result<Self, DataError> {
        Self::with_settings(config, ClientSettings::default())
    }

    /// Create a client with explicit transport settings.
    pub fn with_settings(config: &StoreConfig, settings: ClientSettings) -> Result<Self, DataError> {
        config
            .validate()
            .map_err(|e| DataError::Config(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut token = HeaderValue::from_str(&config.access_token)
            .map_err(|_| DataError::Config("access token is not a valid header value".into()))?;
        token.set_sensitive(true);
        headers.insert(HeaderName::from_static(ACCESS_TOKEN_HEADER), token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| DataError::Config(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint(),
            http,
            retry: settings.retry,
            cache: ResponseCache::new(),
        })
    }

    /// Point the client at a different endpoint URL (gateways, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Execute one GraphQL operation under the given cache policy.
    ///
    /// GraphQL-level errors are logged and returned inside the payload next
    /// to any partial data; only transport-level failures (after retries)
    /// surface as `Err`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        policy: &FetchPolicy,
    ) -> Result<GraphqlPayload<T>, DataError> {
        let cache_key = ResponseCache::key(query, &variables);
        if policy.is_cacheable() {
            if let Some(body) = self.cache.get(cache_key) {
                tracing::debug!(key = cache_key, "serving commerce response from cache");
                return GraphqlPayload::from_slice(&body)
                    .map_err(|e| DataError::Decode(e.to_string()));
            }
        }

        let body = serde_json::json!({ "query": query, "variables": variables });
        let bytes = self.send_with_retry(&body).await?;
        let payload: GraphqlPayload<T> =
            GraphqlPayload::from_slice(&bytes).map_err(|e| DataError::Decode(e.to_string()))?;

        for error in &payload.errors {
            tracing::warn!(message = %error.message, "commerce API returned a GraphQL error");
        }

        if let FetchPolicy::Cached { ttl, tags } = policy {
            // Partial or errored payloads never enter the cache.
            if payload.is_ok() && payload.data.is_some() {
                self.cache.put(cache_key, bytes, *ttl, tags);
            }
        }

        Ok(payload)
    }

    /// Drop every cached response carrying the given tag.
    pub fn invalidate_tag(&self, tag: &str) {
        self.cache.invalidate_tag(tag);
    }

    async fn send_with_retry(&self, body: &serde_json::Value) -> Result<Vec<u8>, DataError> {
        let mut attempt = 1u32;
        loop {
            match self.send_once(body).await {
                Ok(bytes) => return Ok(bytes),
                Err(SendFailure::Fatal(error)) => return Err(error),
                Err(SendFailure::Transient { error, retry_after }) => {
                    if !self.retry.allows_another_attempt(attempt) {
                        tracing::error!(
                            category = error.category(),
                            attempts = attempt,
                            "commerce API call failed after final attempt"
                        );
                        return Err(error);
                    }
                    // An explicit Retry-After from the server overrides the
                    // computed backoff.
                    let delay =
                        retry_after.unwrap_or_else(|| self.retry.delay_after_attempt(attempt));
                    tracing::warn!(
                        category = error.category(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "transient commerce API failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn send_once(&self, body: &serde_json::Value) -> Result<Vec<u8>, SendFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| SendFailure::Transient {
                error: classify_transport(e),
                retry_after: None,
            })?;

        let status = response.status();
        if retryable_status(status.as_u16()) {
            let retry_after = parse_retry_after(response.headers());
            return Err(SendFailure::Transient {
                error: DataError::Server {
                    status: status.as_u16(),
                },
                retry_after,
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SendFailure::Fatal(DataError::Api {
                status: status.as_u16(),
                message: truncate_body(&message),
            }));
        }

        let bytes = response.bytes().await.map_err(|e| SendFailure::Transient {
            error: classify_transport(e),
            retry_after: None,
        })?;
        Ok(bytes.to_vec())
    }
}

enum SendFailure {
    /// Eligible for another attempt, optionally with a server-directed delay.
    Transient {
        error: DataError,
        retry_after: Option<Duration>,
    },
    /// Returned to the caller immediately.
    Fatal(DataError),
}

fn classify_transport(error: reqwest::Error) -> DataError {
    if error.is_timeout() {
        DataError::Timeout
    } else {
        DataError::Network(error.to_string())
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn truncate_body(body: &str) -> String {
    const MAX_LEN: usize = 2048;
    if body.len() <= MAX_LEN {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(MAX_LEN).collect();
    truncated.push('…');
    truncated
}
