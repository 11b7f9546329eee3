//! Payload assembly.
//!
//! Turns a route order into the upstream submission payload and the
//! ordered stop list returned to the caller. Each payload line carries the
//! distance to the next stop, the identifier the upstream system expects
//! for that leg, a planned timestamp and a destination flag.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::dispatch::{JourneySubmission, LineIdentifier, PayloadLine, SubmissionPayload};

use super::error::PlanError;
use super::journey::{OrderedStop, PlanWarning};
use super::pool::{PoolIndex, PooledStop, StopPool};
use super::request::RoutingRequest;

/// Output of assembly before it is bundled into a `PlannedJourney`.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub payload: SubmissionPayload,
    pub stops: Vec<OrderedStop>,
    pub warnings: Vec<PlanWarning>,
}

/// Formats a timestamp the way the upstream API expects.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use journey_dispatch::planner::format_planned_date;
///
/// let t = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
/// assert_eq!(format_planned_date(t), "2024-03-15T10:00:00.000Z");
/// ```
pub fn format_planned_date(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Resolves the planned time for a stop.
///
/// Pickups use their own scheduled time and dropoffs use their pickup's.
/// Failing that, the booking's first pickup time is used. Returns `None`
/// when nothing applies.
fn resolve_planned_time(pool: &StopPool<'_>, entry: &PooledStop<'_>) -> Option<DateTime<Utc>> {
    let stop = entry.stop;

    let own = if stop.is_pickup() {
        stop.scheduled_time
    } else {
        stop.corresponding_pickup_id
            .as_deref()
            .and_then(|pickup_id| pool.find(pickup_id))
            .and_then(|pickup| pickup.stop.scheduled_time)
    };

    own.or_else(|| entry.booking.first_pickup_time())
}

/// Selects the payload identifier for a stop, if it has one.
fn line_identifier(entry: &PooledStop<'_>) -> Option<LineIdentifier> {
    if entry.is_final() {
        entry.booking.final_leg_id().map(LineIdentifier::RequestId)
    } else {
        entry
            .stop
            .upstream_segment_id
            .map(LineIdentifier::BookingSegmentId)
    }
}

/// Builds the payload and ordered stop list for `order`.
///
/// `now` is used only when a stop has no resolvable planned time.
///
/// # Errors
///
/// Returns `PlanError::MissingIdentifier` when a stop needs an upstream
/// identifier it does not have. In update mode, intermediate stops without
/// a segment id are new and are skipped instead.
pub fn assemble(
    pool: &StopPool<'_>,
    order: &[PoolIndex],
    request: &RoutingRequest,
    now: DateTime<Utc>,
) -> Result<Assembled, PlanError> {
    let mut lines = Vec::with_capacity(order.len());
    let mut stops = Vec::with_capacity(order.len());
    let mut warnings = Vec::new();

    for (position, idx) in order.iter().enumerate() {
        let entry = pool.get(*idx);
        let stop = entry.stop;
        let is_final = entry.is_final();

        let distance = order
            .get(position + 1)
            .map(|next| stop.location.distance_to(&pool.get(*next).stop.location))
            .unwrap_or(0.0);

        stops.push(OrderedStop::new(stop, entry.booking.id.clone(), position));

        let identifier = match line_identifier(entry) {
            Some(identifier) => identifier,
            None if request.is_update() && !is_final => {
                debug!(
                    stop_id = %stop.id,
                    address = %stop.location.address,
                    "Skipping new stop without segment id"
                );
                warnings.push(PlanWarning::SkippedStop {
                    stop_id: stop.id.clone(),
                });
                continue;
            }
            None => {
                return Err(PlanError::MissingIdentifier {
                    address: stop.location.address.clone(),
                    stop_type: stop.stop_type,
                });
            }
        };

        let planned = match resolve_planned_time(pool, entry) {
            Some(t) => t,
            None => {
                warn!(
                    stop_id = %stop.id,
                    address = %stop.location.address,
                    "No planned time resolvable, using current time"
                );
                warnings.push(PlanWarning::UnresolvablePlannedDate {
                    stop_id: stop.id.clone(),
                });
                now
            }
        };

        lines.push(PayloadLine {
            identifier,
            is_destination: is_final,
            planned_date: format_planned_date(planned),
            distance,
        });
    }

    let journey = JourneySubmission {
        id: request.existing_journey_id,
        bookings: lines,
        enable_messaging_service: request.enable_messaging.then_some(true),
        price: None,
        cost: None,
    };

    Ok(Assembled {
        payload: SubmissionPayload::single(journey),
        stops,
        warnings,
    })
}
