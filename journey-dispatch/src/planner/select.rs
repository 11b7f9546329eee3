//! Greedy stop sequencing.
//!
//! Orders every stop in the pool into one route. The route starts at the
//! earliest scheduled pickup and then repeatedly moves to the nearest stop
//! that is allowed next: any unvisited pickup, or the dropoff of a passenger
//! already on board. This is nearest-neighbour, not an optimal solver;
//! journeys are a handful of bookings and the answer is needed immediately.

use tracing::{debug, warn};

use super::error::PlanError;
use super::pool::{PoolIndex, StopPool};
use super::precedence::InVehicle;

/// The computed visiting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOrder {
    /// Every pool index exactly once, in visiting order.
    pub order: Vec<PoolIndex>,

    /// Stops appended unordered because no candidate remained.
    /// Empty for well-formed input.
    pub stranded: Vec<PoolIndex>,
}

impl RouteOrder {
    /// Returns true if routing had to fall back to pool order.
    pub fn is_degraded(&self) -> bool {
        !self.stranded.is_empty()
    }
}

/// Chooses the first stop of the route.
///
/// The earliest scheduled pickup wins. Pickups with no time are "as soon as
/// possible" and sort after every timed pickup. Ties go to the booking that
/// was submitted first, then to pool order.
pub fn select_seed(pool: &StopPool<'_>) -> Result<PoolIndex, PlanError> {
    pool.pickups()
        .min_by_key(|(_, entry)| {
            let time = entry.stop.scheduled_time;
            (time.is_none(), time, entry.booking_index)
        })
        .map(|(idx, _)| idx)
        .ok_or(PlanError::NoPickupStops)
}

/// Orders every stop in `pool` into a single route.
///
/// # Errors
///
/// Returns `PlanError::NoPickupStops` if the pool has no pickup to start
/// from.
pub fn select_route(pool: &StopPool<'_>) -> Result<RouteOrder, PlanError> {
    let seed = select_seed(pool)?;

    let mut visited = vec![false; pool.len()];
    let mut in_vehicle = InVehicle::new();
    let mut order = Vec::with_capacity(pool.len());

    visited[seed.0] = true;
    in_vehicle.visit(pool.get(seed).stop);
    order.push(seed);
    let mut current = seed;

    while order.len() < pool.len() {
        let here = &pool.get(current).stop.location;

        // Strict less-than keeps the first candidate on exact ties.
        let mut nearest: Option<(PoolIndex, f64)> = None;
        for (idx, entry) in pool.iter() {
            if visited[idx.0] || !in_vehicle.permits(entry.stop) {
                continue;
            }
            let d = here.distance_to(&entry.stop.location);
            if nearest.is_none_or(|(_, best)| d < best) {
                nearest = Some((idx, d));
            }
        }

        let Some((next, _)) = nearest else {
            let stranded: Vec<PoolIndex> = pool
                .iter()
                .map(|(idx, _)| idx)
                .filter(|idx| !visited[idx.0])
                .collect();

            let stop_ids: Vec<&str> = stranded
                .iter()
                .map(|idx| pool.get(*idx).stop.id.as_str())
                .collect();
            warn!(
                remaining = stranded.len(),
                on_board = in_vehicle.len(),
                ?stop_ids,
                "No eligible next stop, appending remaining stops in pool order"
            );

            order.extend(stranded.iter().copied());
            return Ok(RouteOrder { order, stranded });
        };

        visited[next.0] = true;
        in_vehicle.visit(pool.get(next).stop);
        order.push(next);
        current = next;
    }

    debug!(
        stops = order.len(),
        on_board = in_vehicle.len(),
        "Route ordered"
    );

    Ok(RouteOrder {
        order,
        stranded: Vec::new(),
    })
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
