//! In-vehicle tracking.
//!
//! A passenger is identified by the id of their pickup stop. They are in
//! the vehicle from the moment that pickup is visited until the matching
//! dropoff is visited. Only dropoffs of in-vehicle passengers may be
//! scheduled next.

use std::collections::HashSet;

use crate::domain::{Stop, StopType};

/// The set of passengers currently on board.
#[derive(Debug, Default, Clone)]
pub struct InVehicle<'a> {
    on_board: HashSet<&'a str>,
}

impl<'a> InVehicle<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit to `stop`.
    ///
    /// A pickup boards its passenger; a dropoff alights the passenger of
    /// its corresponding pickup.
    pub fn visit(&mut self, stop: &'a Stop) {
        match stop.stop_type {
            StopType::Pickup => {
                self.on_board.insert(stop.id.as_str());
            }
            StopType::Dropoff => {
                if let Some(pickup_id) = stop.corresponding_pickup_id.as_deref() {
                    self.on_board.remove(pickup_id);
                }
            }
        }
    }

    /// Returns true if `stop` may be visited now.
    ///
    /// Pickups are always allowed. A dropoff is allowed only when its
    /// passenger is on board.
    pub fn permits(&self, stop: &Stop) -> bool {
        match stop.stop_type {
            StopType::Pickup => true,
            StopType::Dropoff => stop
                .corresponding_pickup_id
                .as_deref()
                .is_some_and(|pickup_id| self.contains(pickup_id)),
        }
    }

    /// Returns true if the passenger picked up at `pickup_id` is on board.
    pub fn contains(&self, pickup_id: &str) -> bool {
        self.on_board.contains(pickup_id)
    }

    /// Number of passengers on board.
    pub(crate) fn len(&self) -> usize {
        self.on_board.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    fn loc() -> Location {
        Location::new("X", 0.0, 0.0)
    }

    #[test]
    fn dropoff_requires_pickup() {
        let pickup = Stop::pickup("p1", loc());
        let dropoff = Stop::dropoff("d1", loc(), "p1");
        let mut in_vehicle = InVehicle::new();

        assert!(in_vehicle.permits(&pickup));
        assert!(!in_vehicle.permits(&dropoff));

        in_vehicle.visit(&pickup);
        assert!(in_vehicle.contains("p1"));
        assert!(in_vehicle.permits(&dropoff));

        in_vehicle.visit(&dropoff);
        assert!(!in_vehicle.contains("p1"));
        assert_eq!(in_vehicle.len(), 0);
    }

    #[test]
    fn dropoff_without_pickup_reference_is_never_permitted() {
        let mut orphan = Stop::dropoff("d1", loc(), "p1");
        orphan.corresponding_pickup_id = None;

        let mut in_vehicle = InVehicle::new();
        let pickup = Stop::pickup("p1", loc());
        in_vehicle.visit(&pickup);

        assert!(!in_vehicle.permits(&orphan));
        in_vehicle.visit(&orphan);
        assert_eq!(in_vehicle.len(), 1);
    }

    #[test]
    fn tracks_several_passengers() {
        let p1 = Stop::pickup("p1", loc());
        let p2 = Stop::pickup("p2", loc());
        let d2 = Stop::dropoff("d2", loc(), "p2");
        let mut in_vehicle = InVehicle::new();

        in_vehicle.visit(&p1);
        in_vehicle.visit(&p2);
        assert_eq!(in_vehicle.len(), 2);

        in_vehicle.visit(&d2);
        assert!(in_vehicle.contains("p1"));
        assert!(!in_vehicle.contains("p2"));
    }
}
