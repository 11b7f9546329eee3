//! In-memory dispatch client for development and tests.
//!
//! Records every submitted payload and hands out journey ids without
//! talking to a real dispatch system.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use super::error::DispatchError;
use super::submit::JourneySubmitter;
use super::types::SubmissionPayload;

/// First journey id handed out for new journeys.
const FIRST_JOURNEY_ID: i64 = 1000;

/// Mock dispatch client.
///
/// New journeys get sequential ids starting at 1000. Updates return the id
/// they target. Clones share the same record of submissions.
#[derive(Debug, Clone)]
pub struct MockDispatchClient {
    submissions: Arc<RwLock<Vec<SubmissionPayload>>>,
    next_id: Arc<AtomicI64>,
    reject_with_status: Option<u16>,
}

impl Default for MockDispatchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDispatchClient {
    /// Create a mock that accepts every submission.
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(FIRST_JOURNEY_ID)),
            reject_with_status: None,
        }
    }

    /// Create a mock that rejects every submission with `status`.
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with_status: Some(status),
            ..Self::new()
        }
    }

    /// Returns all accepted payloads in submission order.
    pub async fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.read().await.clone()
    }

    /// Returns the number of accepted payloads.
    pub async fn submission_count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

impl JourneySubmitter for MockDispatchClient {
    async fn submit_journey(&self, payload: &SubmissionPayload) -> Result<i64, DispatchError> {
        if let Some(status) = self.reject_with_status {
            return Err(DispatchError::Refused {
                status,
                journey_id: payload.journey_id(),
                message: "rejected by mock".to_string(),
            });
        }

        let journey_id = match payload.journey_id() {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };

        self.submissions.write().await.push(payload.clone());
        debug!(journey_id, lines = payload.line_count(), "Mock accepted journey");

        Ok(journey_id)
    }
}
