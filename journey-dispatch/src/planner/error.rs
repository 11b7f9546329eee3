//! Planner error types.

use crate::domain::StopType;

/// Fatal errors from journey planning.
///
/// Soft failures (stranded passengers, unresolvable dates, skipped stops)
/// are not errors; they are reported as `PlanWarning`s alongside a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The request is malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No pickup stops, so there is nowhere to start the route
    #[error("no pickup stops: a route cannot be seeded")]
    NoPickupStops,

    /// A stop that must appear in the payload has no upstream identifier
    #[error("missing upstream identifier for {stop_type} at {address}")]
    MissingIdentifier { address: String, stop_type: StopType },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanError::InvalidRequest("no bookings supplied".into());
        assert_eq!(err.to_string(), "invalid request: no bookings supplied");

        let err = PlanError::NoPickupStops;
        assert_eq!(err.to_string(), "no pickup stops: a route cannot be seeded");

        let err = PlanError::MissingIdentifier {
            address: "1 Main St".into(),
            stop_type: StopType::Pickup,
        };
        assert_eq!(
            err.to_string(),
            "missing upstream identifier for pickup at 1 Main St"
        );
    }
}
