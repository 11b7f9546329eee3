//! Dispatch API HTTP client.
//!
//! Submits assembled journey payloads to the upstream scheduling system.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::error::DispatchError;
use super::submit::JourneySubmitter;
use super::types::{SubmissionPayload, SubmissionResponse};

/// Submissions in flight at once unless configured otherwise.
const DEFAULT_MAX_CONCURRENT: usize = 4;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of an upstream body kept in an error.
const MAX_ECHOED_BODY: usize = 500;

/// Where and how to reach the dispatch API.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Sent as `Authorization: Bearer <api_key>`
    pub api_key: String,
    /// Base URL with any trailing slash removed
    pub base_url: String,
    /// Upper bound on submissions in flight
    pub max_concurrent: usize,
    pub timeout: Duration,
}

impl DispatchConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint that accepts journey submissions.
    pub fn journeys_url(&self) -> String {
        format!("{}/journeys", self.base_url)
    }

    /// Builds the bearer header, rejecting settings no request could use.
    fn auth_header(&self) -> Result<HeaderValue, DispatchError> {
        if self.base_url.is_empty() {
            return Err(DispatchError::NotConfigured("base URL is empty".into()));
        }
        if self.api_key.is_empty() {
            return Err(DispatchError::NotConfigured("API key is empty".into()));
        }
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(
            |_| DispatchError::NotConfigured("API key is not a valid header value".into()),
        )?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// HTTP client for the dispatch API.
///
/// Clones share one connection pool and one concurrency gate.
#[derive(Debug, Clone)]
pub struct DispatchClient {
    http: reqwest::Client,
    journeys_url: String,
    gate: Arc<Semaphore>,
}

impl DispatchClient {
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, config.auth_header()?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            journeys_url: config.journeys_url(),
            gate: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Sends `payload` and returns the journey id dispatch assigned or
    /// confirmed.
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<i64, DispatchError> {
        let journey_id = payload.journey_id();
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| DispatchError::ClientClosed)?;

        debug!(
            url = %self.journeys_url,
            ?journey_id,
            lines = payload.line_count(),
            "Submitting journey"
        );

        let response = self
            .http
            .post(&self.journeys_url)
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let assigned = read_reply(status, journey_id, &body).inspect_err(|e| {
            warn!(%status, ?journey_id, retryable = e.is_retryable(), "Journey submission failed");
        })?;

        info!(journey_id = assigned, "Journey submitted");
        Ok(assigned)
    }
}

impl JourneySubmitter for DispatchClient {
    async fn submit_journey(&self, payload: &SubmissionPayload) -> Result<i64, DispatchError> {
        self.submit(payload).await
    }
}

/// Turns a dispatch reply into the assigned journey id.
///
/// `journey_id` is the id the payload targeted, carried into errors so a
/// failed update can be traced back to its journey.
fn read_reply(
    status: StatusCode,
    journey_id: Option<i64>,
    body: &str,
) -> Result<i64, DispatchError> {
    let echoed = || body.chars().take(MAX_ECHOED_BODY).collect::<String>();

    match status {
        StatusCode::UNAUTHORIZED => Err(DispatchError::BadCredentials),
        StatusCode::FORBIDDEN => Err(DispatchError::Forbidden { journey_id }),
        StatusCode::TOO_MANY_REQUESTS => Err(DispatchError::Throttled),
        s if !s.is_success() => Err(DispatchError::Refused {
            status: s.as_u16(),
            journey_id,
            message: echoed(),
        }),
        _ => serde_json::from_str::<SubmissionResponse>(body)
            .map(|r| r.journey_id)
            .map_err(|e| DispatchError::MalformedReply {
                reason: e.to_string(),
                body: (!body.is_empty()).then(echoed),
            }),
    }
}
