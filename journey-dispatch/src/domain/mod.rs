//! Domain types for journey dispatch.
//!
//! Plain value types describing bookings and their stops. Routing and
//! payload assembly live in `planner`; nothing here performs I/O.

mod booking;
mod location;
mod stop;

pub use booking::{Booking, BookingReceipt};
pub use location::{EARTH_RADIUS_M, Location, distance_meters};
pub use stop::{Stop, StopType};
