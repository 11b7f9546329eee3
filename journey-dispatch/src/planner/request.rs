//! Routing request and its validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::Booking;

use super::error::PlanError;

/// Input to the planner: the bookings to combine into one journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingRequest {
    /// Bookings in submission order. Position here breaks seed ties.
    pub bookings: Vec<Booking>,

    /// Upstream journey being updated. `None` creates a new journey.
    #[serde(default)]
    pub existing_journey_id: Option<i64>,

    /// Ask the upstream system to enable its messaging service
    #[serde(default)]
    pub enable_messaging: bool,
}

impl RoutingRequest {
    /// Creates a request for a new journey.
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            existing_journey_id: None,
            enable_messaging: false,
        }
    }

    /// Marks the request as an update of an existing upstream journey.
    pub fn updating(mut self, journey_id: i64) -> Self {
        self.existing_journey_id = Some(journey_id);
        self
    }

    /// Enables the messaging service flag on the submission.
    pub fn with_messaging(mut self) -> Self {
        self.enable_messaging = true;
        self
    }

    /// Returns true if this request updates an existing journey.
    pub fn is_update(&self) -> bool {
        self.existing_journey_id.is_some()
    }

    /// Total number of stops across all bookings.
    pub fn stop_count(&self) -> usize {
        self.bookings.iter().map(|b| b.stops.len()).sum()
    }

    /// Validate the request.
    ///
    /// Dropoffs whose pickup is missing are not rejected here; routing
    /// degrades around them instead.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.bookings.is_empty() {
            return Err(PlanError::InvalidRequest("no bookings supplied".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.stop_count());

        for booking in &self.bookings {
            if booking.stops.is_empty() {
                return Err(PlanError::InvalidRequest(format!(
                    "booking {} has no stops",
                    booking.id
                )));
            }

            for stop in &booking.stops {
                if !seen.insert(stop.id.as_str()) {
                    return Err(PlanError::InvalidRequest(format!(
                        "duplicate stop id {}",
                        stop.id
                    )));
                }

                let loc = &stop.location;
                if !loc.lat.is_finite() || !loc.lng.is_finite() {
                    return Err(PlanError::InvalidRequest(format!(
                        "stop {} has invalid coordinates",
                        stop.id
                    )));
                }
            }
        }

        Ok(())
    }
}
