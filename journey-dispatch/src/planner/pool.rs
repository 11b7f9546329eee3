//! Flattened stop pool.
//!
//! Routing works over a single list of every stop in the request. Each
//! entry borrows its stop and records which booking it came from, so the
//! relation is an index rather than a pointer back into the booking.

use std::collections::HashMap;

use crate::domain::{Booking, Stop};

/// Position of a stop within the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolIndex(pub usize);

/// A stop together with its owning booking.
#[derive(Debug, Clone, Copy)]
pub struct PooledStop<'a> {
    pub stop: &'a Stop,
    pub booking: &'a Booking,
    /// Position of the owning booking in the request
    pub booking_index: usize,
}

impl PooledStop<'_> {
    /// Returns true if this is the final stop of its booking.
    pub fn is_final(&self) -> bool {
        self.booking.is_final_stop(&self.stop.id)
    }
}

/// Every stop of a request, in booking order then stop order.
#[derive(Debug)]
pub struct StopPool<'a> {
    entries: Vec<PooledStop<'a>>,
    by_id: HashMap<&'a str, PoolIndex>,
}

impl<'a> StopPool<'a> {
    /// Flattens `bookings` into a pool.
    pub fn new(bookings: &'a [Booking]) -> Self {
        let mut entries = Vec::new();
        let mut by_id = HashMap::new();

        for (booking_index, booking) in bookings.iter().enumerate() {
            for stop in &booking.stops {
                by_id.insert(stop.id.as_str(), PoolIndex(entries.len()));
                entries.push(PooledStop {
                    stop,
                    booking,
                    booking_index,
                });
            }
        }

        Self { entries, by_id }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entry at `idx`.
    ///
    /// Panics if `idx` did not come from this pool.
    pub fn get(&self, idx: PoolIndex) -> &PooledStop<'a> {
        &self.entries[idx.0]
    }

    /// Looks up a stop by id.
    pub fn find(&self, stop_id: &str) -> Option<&PooledStop<'a>> {
        self.by_id.get(stop_id).map(|idx| self.get(*idx))
    }

    /// Iterates over entries with their indices, in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolIndex, &PooledStop<'a>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (PoolIndex(i), entry))
    }

    /// Iterates over pickup entries, in pool order.
    pub fn pickups(&self) -> impl Iterator<Item = (PoolIndex, &PooledStop<'a>)> {
        self.iter().filter(|(_, entry)| entry.stop.is_pickup())
    }
}
