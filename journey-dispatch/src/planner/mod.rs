//! Journey planner.
//!
//! Combines the stops of several bookings into one route and builds the
//! payload that submits it upstream.
//!
//! Routing is greedy nearest-neighbour from the earliest scheduled pickup,
//! constrained so that no dropoff is visited before its pickup. Assembly
//! then annotates each stop with distance, identifier and planned time.

mod assemble;
mod error;
mod journey;
mod pool;
mod precedence;
mod request;
mod select;

pub use assemble::format_planned_date;
pub use error::PlanError;
pub use journey::{OrderedStop, PlanWarning, PlannedJourney, plan_journey, plan_journey_at};
pub use pool::{PoolIndex, PooledStop, StopPool};
pub use precedence::InVehicle;
pub use request::RoutingRequest;
pub use select::{RouteOrder, select_route, select_seed};
