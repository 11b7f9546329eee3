//! Wire types for the upstream dispatch API.
//!
//! Field names here are the upstream contract and must not change. Several
//! flags travel as the strings `"true"` / `"false"` rather than JSON
//! booleans; `bool_string` handles that conversion.

use serde::{Deserialize, Serialize};

/// Identifier carried by one payload line.
///
/// A booking's final stop is addressed by its request id, every other stop
/// by the segment id of its outgoing leg. Flattened into the line, so it
/// serializes as either `"request_id": n` or `"bookingsegment_id": n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineIdentifier {
    #[serde(rename = "request_id")]
    RequestId(i64),
    #[serde(rename = "bookingsegment_id")]
    BookingSegmentId(i64),
}

/// One stop of the journey as the upstream system sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadLine {
    #[serde(flatten)]
    pub identifier: LineIdentifier,

    /// True for a booking's final stop
    #[serde(with = "bool_string")]
    pub is_destination: bool,

    /// ISO-8601 UTC timestamp with millisecond precision
    pub planned_date: String,

    /// Distance to the next stop in metres; zero on the last stop
    pub distance: f64,
}

/// A single journey within a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneySubmission {
    /// Journey to update, or `None` to create one
    pub id: Option<i64>,

    pub bookings: Vec<PayloadLine>,

    #[serde(
        default,
        with = "bool_string::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_messaging_service: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// The complete request body sent to the dispatch API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(with = "bool_string")]
    pub logs: bool,

    #[serde(with = "bool_string")]
    pub delete_outstanding_journeys: bool,

    pub keyless_response: bool,

    pub journeys: Vec<JourneySubmission>,
}

impl SubmissionPayload {
    /// Wraps a single journey in the standard envelope.
    pub fn single(journey: JourneySubmission) -> Self {
        Self {
            logs: false,
            delete_outstanding_journeys: false,
            keyless_response: true,
            journeys: vec![journey],
        }
    }

    /// Merges journey-level pricing into every journey of the payload.
    ///
    /// `None` leaves the existing value untouched.
    pub fn with_pricing(mut self, price: Option<f64>, cost: Option<f64>) -> Self {
        for journey in &mut self.journeys {
            if price.is_some() {
                journey.price = price;
            }
            if cost.is_some() {
                journey.cost = cost;
            }
        }
        self
    }

    /// Returns the journey id being targeted, if any.
    pub fn journey_id(&self) -> Option<i64> {
        self.journeys.first().and_then(|j| j.id)
    }

    /// Total number of payload lines across journeys.
    pub fn line_count(&self) -> usize {
        self.journeys.iter().map(|j| j.bookings.len()).sum()
    }
}

/// Response from the dispatch API after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionResponse {
    #[serde(alias = "id")]
    pub journey_id: i64,
}

/// `"true"` / `"false"` string encoding for booleans.
pub(crate) mod bool_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::custom(format!(
                "expected \"true\" or \"false\", got {other:?}"
            ))),
        }
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<bool>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<bool>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] bool);

            let wrapped = Option::<Wrapper>::deserialize(deserializer)?;
            Ok(wrapped.map(|Wrapper(v)| v))
        }
    }
}
