//! Booking types.
//!
//! A `Booking` is one passenger's ordered pickup → (vias) → dropoff request.
//! The order of `stops` as supplied is significant: its last element is the
//! booking's final stop, regardless of where routing later places it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stop;

/// Identifiers handed back by the upstream system when a booking is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    /// Upstream booking id
    pub booking_id: i64,

    /// One segment id per leg, in leg order
    #[serde(default)]
    pub segment_ids: Vec<i64>,
}

/// A point-to-point booking made up of one or more stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,

    /// Set once the booking has been created upstream
    #[serde(default)]
    pub upstream_booking_id: Option<i64>,

    /// Upstream id used on the booking's final leg
    #[serde(default)]
    pub request_id: Option<i64>,

    pub stops: Vec<Stop>,
}

impl Booking {
    /// Creates a booking with no upstream identifiers.
    pub fn new(id: impl Into<String>, stops: Vec<Stop>) -> Self {
        Self {
            id: id.into(),
            upstream_booking_id: None,
            request_id: None,
            stops,
        }
    }

    /// Sets the request id.
    pub fn with_request_id(mut self, request_id: i64) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Returns the final stop of the booking as supplied.
    pub fn final_stop(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Returns true if `stop_id` names this booking's final stop.
    pub fn is_final_stop(&self, stop_id: &str) -> bool {
        self.final_stop().is_some_and(|s| s.id == stop_id)
    }

    /// Returns the identifier for the final leg.
    ///
    /// Prefers the explicit request id, falling back to the upstream
    /// booking id.
    pub fn final_leg_id(&self) -> Option<i64> {
        self.request_id.or(self.upstream_booking_id)
    }

    /// Returns the scheduled time of the first pickup, if it has one.
    pub fn first_pickup_time(&self) -> Option<DateTime<Utc>> {
        self.stops
            .iter()
            .find(|s| s.is_pickup())
            .and_then(|s| s.scheduled_time)
    }

    /// Applies a creation receipt.
    ///
    /// Records the upstream booking id, fills the request id if it is not
    /// already set, and hands out segment ids to the non-final stops in
    /// order. Surplus segment ids are ignored; stops left without a
    /// matching id keep whatever they had.
    pub fn attach_receipt(&mut self, receipt: &BookingReceipt) {
        self.upstream_booking_id = Some(receipt.booking_id);
        if self.request_id.is_none() {
            self.request_id = Some(receipt.booking_id);
        }

        let legs = self.stops.len().saturating_sub(1);
        for (stop, segment_id) in self.stops[..legs].iter_mut().zip(&receipt.segment_ids) {
            stop.upstream_segment_id = Some(*segment_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;
    use chrono::TimeZone;

    fn three_stop_booking() -> Booking {
        Booking::new(
            "b1",
            vec![
                Stop::pickup("p1", Location::new("A", 53.0, -6.0)),
                Stop::pickup("v1", Location::new("B", 53.1, -6.0)),
                Stop::dropoff("d1", Location::new("C", 53.2, -6.0), "p1"),
            ],
        )
    }

    #[test]
    fn final_stop_is_last_supplied() {
        let booking = three_stop_booking();
        assert!(booking.is_final_stop("d1"));
        assert!(!booking.is_final_stop("p1"));
        assert!(!booking.is_final_stop("v1"));
    }

    #[test]
    fn final_leg_id_prefers_request_id() {
        let mut booking = three_stop_booking();
        assert_eq!(booking.final_leg_id(), None);

        booking.upstream_booking_id = Some(7);
        assert_eq!(booking.final_leg_id(), Some(7));

        booking.request_id = Some(9);
        assert_eq!(booking.final_leg_id(), Some(9));
    }

    #[test]
    fn first_pickup_time() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        let mut booking = three_stop_booking();
        assert_eq!(booking.first_pickup_time(), None);

        booking.stops[0].scheduled_time = Some(t);
        assert_eq!(booking.first_pickup_time(), Some(t));
    }

    #[test]
    fn attach_receipt_assigns_segments_in_leg_order() {
        let mut booking = three_stop_booking();
        booking.attach_receipt(&BookingReceipt {
            booking_id: 100,
            segment_ids: vec![501, 502],
        });

        assert_eq!(booking.upstream_booking_id, Some(100));
        assert_eq!(booking.request_id, Some(100));
        assert_eq!(booking.stops[0].upstream_segment_id, Some(501));
        assert_eq!(booking.stops[1].upstream_segment_id, Some(502));
        assert_eq!(booking.stops[2].upstream_segment_id, None);
    }

    #[test]
    fn attach_receipt_keeps_existing_request_id() {
        let mut booking = three_stop_booking().with_request_id(55);
        booking.attach_receipt(&BookingReceipt {
            booking_id: 100,
            segment_ids: vec![501],
        });

        assert_eq!(booking.request_id, Some(55));
        assert_eq!(booking.stops[0].upstream_segment_id, Some(501));
        assert_eq!(booking.stops[1].upstream_segment_id, None);
    }

    #[test]
    fn attach_receipt_ignores_surplus_segments() {
        let mut booking = Booking::new(
            "b2",
            vec![
                Stop::pickup("p", Location::new("A", 0.0, 0.0)),
                Stop::dropoff("d", Location::new("B", 0.0, 1.0), "p"),
            ],
        );
        booking.attach_receipt(&BookingReceipt {
            booking_id: 1,
            segment_ids: vec![10, 11, 12],
        });

        assert_eq!(booking.stops[0].upstream_segment_id, Some(10));
        assert_eq!(booking.stops[1].upstream_segment_id, None);
    }
}
