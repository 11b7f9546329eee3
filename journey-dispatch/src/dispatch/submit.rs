//! Journey submission seam.

use std::future::Future;

use super::error::DispatchError;
use super::types::SubmissionPayload;

/// Something that accepts a journey payload and returns the upstream
/// journey id.
///
/// This abstraction lets the web layer be tested against a mock.
pub trait JourneySubmitter {
    /// Submit `payload`, creating or updating a journey upstream.
    fn submit_journey(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<i64, DispatchError>> + Send;
}
