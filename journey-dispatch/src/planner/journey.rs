//! Planner entry point and result types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dispatch::SubmissionPayload;
use crate::domain::{Location, Stop, StopType};

use super::assemble::assemble;
use super::error::PlanError;
use super::pool::StopPool;
use super::request::RoutingRequest;
use super::select::select_route;

/// A stop annotated with its place in the computed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedStop {
    pub id: String,
    pub location: Location,
    pub stop_type: StopType,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub corresponding_pickup_id: Option<String>,
    pub upstream_segment_id: Option<i64>,
    /// Booking this stop belongs to
    pub booking_id: String,
    /// Zero-based position in the route
    pub position: usize,
}

impl OrderedStop {
    pub fn new(stop: &Stop, booking_id: String, position: usize) -> Self {
        Self {
            id: stop.id.clone(),
            location: stop.location.clone(),
            stop_type: stop.stop_type,
            scheduled_time: stop.scheduled_time,
            corresponding_pickup_id: stop.corresponding_pickup_id.clone(),
            upstream_segment_id: stop.upstream_segment_id,
            booking_id,
            position,
        }
    }
}

/// A non-fatal problem met while planning.
///
/// The plan is still usable; these are surfaced so the caller can show
/// them or log them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// No eligible next stop remained; these were appended in input order
    StrandedPassengers { stop_ids: Vec<String> },

    /// No scheduled time applied, so the current time was used
    UnresolvablePlannedDate { stop_id: String },

    /// New stop in an update without a segment id; left out of the payload
    SkippedStop { stop_id: String },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::StrandedPassengers { stop_ids } => {
                write!(f, "stops appended unordered: {}", stop_ids.join(", "))
            }
            PlanWarning::UnresolvablePlannedDate { stop_id } => {
                write!(f, "no planned time for stop {stop_id}, used current time")
            }
            PlanWarning::SkippedStop { stop_id } => {
                write!(f, "stop {stop_id} has no segment id yet and was not submitted")
            }
        }
    }
}

/// The result of planning a journey.
#[derive(Debug, Clone)]
pub struct PlannedJourney {
    /// Body to send to the dispatch API
    pub payload: SubmissionPayload,

    /// Every stop in route order
    pub stops: Vec<OrderedStop>,

    pub warnings: Vec<PlanWarning>,
}

impl PlannedJourney {
    /// Returns true if planning hit any soft failure.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Plans a journey using the current time for unresolvable dates.
///
/// See [`plan_journey_at`].
pub fn plan_journey(request: &RoutingRequest) -> Result<PlannedJourney, PlanError> {
    plan_journey_at(request, Utc::now())
}

/// Orders the request's stops into one route and builds its payload.
///
/// Deterministic for a given `request` and `now`.
///
/// # Errors
///
/// - `PlanError::InvalidRequest` if the request fails validation; this
///   includes a request with no bookings, which is reported here rather
///   than as `NoPickupStops`
/// - `PlanError::NoPickupStops` if bookings were given but none has a pickup
/// - `PlanError::MissingIdentifier` if a stop lacks its upstream id
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use journey_dispatch::domain::{Booking, Location, Stop};
/// use journey_dispatch::planner::{RoutingRequest, plan_journey_at};
///
/// let booking = Booking::new(
///     "b1",
///     vec![
///         Stop::pickup("p1", Location::new("Alice", 40.7128, -74.0060)).with_segment_id(10),
///         Stop::dropoff("d1", Location::new("Office", 40.8528, -74.0560), "p1"),
///     ],
/// )
/// .with_request_id(20);
///
/// let planned = plan_journey_at(&RoutingRequest::new(vec![booking]), Utc::now()).unwrap();
/// assert_eq!(planned.stops.len(), 2);
/// assert_eq!(planned.payload.line_count(), 2);
/// ```
pub fn plan_journey_at(
    request: &RoutingRequest,
    now: DateTime<Utc>,
) -> Result<PlannedJourney, PlanError> {
    request.validate()?;

    let pool = StopPool::new(&request.bookings);
    let route = select_route(&pool)?;

    let mut warnings = Vec::new();
    if route.is_degraded() {
        warnings.push(PlanWarning::StrandedPassengers {
            stop_ids: route
                .stranded
                .iter()
                .map(|idx| pool.get(*idx).stop.id.clone())
                .collect(),
        });
    }

    let assembled = assemble(&pool, &route.order, request, now)?;
    warnings.extend(assembled.warnings);

    info!(
        bookings = request.bookings.len(),
        stops = assembled.stops.len(),
        lines = assembled.payload.line_count(),
        warnings = warnings.len(),
        update = request.is_update(),
        "Journey planned"
    );

    Ok(PlannedJourney {
        payload: assembled.payload,
        stops: assembled.stops,
        warnings,
    })
}
