//! Stop types.
//!
//! A `Stop` is a single pickup or dropoff belonging to one booking.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

/// Whether a stop picks a passenger up or sets them down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    Pickup,
    Dropoff,
}

impl StopType {
    /// Returns the lowercase name used on the wire and in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopType::Pickup => "pickup",
            StopType::Dropoff => "dropoff",
        }
    }
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pickup or dropoff within a booking.
///
/// The owning booking is not stored here. The planner tracks the
/// stop-to-booking relation in its own pool index instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Identifier, unique within one routing request
    pub id: String,

    pub location: Location,

    pub stop_type: StopType,

    /// Requested pickup time. `None` means "as soon as possible".
    /// Only meaningful on pickups.
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,

    /// On a dropoff, the id of the pickup of the same passenger
    #[serde(default)]
    pub corresponding_pickup_id: Option<String>,

    /// Segment id assigned upstream to this stop's outgoing leg
    #[serde(default)]
    pub upstream_segment_id: Option<i64>,
}

impl Stop {
    /// Creates a pickup with no scheduled time and no upstream ids.
    pub fn pickup(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            location,
            stop_type: StopType::Pickup,
            scheduled_time: None,
            corresponding_pickup_id: None,
            upstream_segment_id: None,
        }
    }

    /// Creates a dropoff for the passenger picked up at `pickup_id`.
    pub fn dropoff(
        id: impl Into<String>,
        location: Location,
        pickup_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            stop_type: StopType::Dropoff,
            scheduled_time: None,
            corresponding_pickup_id: Some(pickup_id.into()),
            upstream_segment_id: None,
        }
    }

    /// Sets the scheduled time.
    pub fn scheduled_at(mut self, time: DateTime<Utc>) -> Self {
        self.scheduled_time = Some(time);
        self
    }

    /// Sets the upstream segment id.
    pub fn with_segment_id(mut self, segment_id: i64) -> Self {
        self.upstream_segment_id = Some(segment_id);
        self
    }

    pub fn is_pickup(&self) -> bool {
        self.stop_type == StopType::Pickup
    }
}
