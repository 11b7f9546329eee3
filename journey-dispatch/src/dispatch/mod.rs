//! Upstream dispatch API.
//!
//! Wire types for journey submissions, an HTTP client that sends them and
//! an in-memory mock of the same interface.
//!
//! Booking creation happens before journey assembly. Its receipts are
//! applied with `Booking::attach_receipt` so every stop carries the
//! identifiers the payload needs.

mod client;
mod error;
mod mock;
mod submit;
mod types;

pub use client::{DispatchClient, DispatchConfig};
pub use error::DispatchError;
pub use mock::MockDispatchClient;
pub use submit::JourneySubmitter;
pub use types::{
    JourneySubmission, LineIdentifier, PayloadLine, SubmissionPayload, SubmissionResponse,
};
