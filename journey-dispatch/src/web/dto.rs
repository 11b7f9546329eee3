//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::dispatch::SubmissionPayload;
use crate::planner::{OrderedStop, PlanWarning, PlannedJourney, RoutingRequest};

/// Request to plan and submit a journey.
#[derive(Debug, Deserialize)]
pub struct SubmitJourneyRequest {
    /// Bookings and journey options
    #[serde(flatten)]
    pub routing: RoutingRequest,

    /// Journey-level price, merged into the payload after assembly
    #[serde(default)]
    pub price: Option<f64>,

    /// Journey-level cost, merged into the payload after assembly
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Planned journey shown to the dispatcher before submitting.
#[derive(Debug, Serialize)]
pub struct PreviewJourneyResponse {
    /// Stops in route order
    pub stops: Vec<OrderedStop>,

    /// Payload that would be submitted
    pub payload: SubmissionPayload,

    /// Soft failures met while planning
    pub warnings: Vec<PlanWarning>,
}

impl From<PlannedJourney> for PreviewJourneyResponse {
    fn from(planned: PlannedJourney) -> Self {
        Self {
            stops: planned.stops,
            payload: planned.payload,
            warnings: planned.warnings,
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitJourneyResponse {
    /// Upstream journey id
    pub journey_id: i64,

    /// Stops in route order
    pub stops: Vec<OrderedStop>,

    /// Soft failures met while planning
    pub warnings: Vec<PlanWarning>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
