//! Unit tests for stop sequencing.

use super::*;
use crate::domain::{Booking, Location, Stop};
use chrono::{DateTime, TimeZone, Utc};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, hour, min, 0).unwrap()
}

fn loc(address: &str, lat: f64, lng: f64) -> Location {
    Location::new(address, lat, lng)
}

fn simple_booking(id: &str, pickup: (&str, Location), dropoff: (&str, Location)) -> Booking {
    Booking::new(
        id,
        vec![
            Stop::pickup(pickup.0, pickup.1),
            Stop::dropoff(dropoff.0, dropoff.1, pickup.0),
        ],
    )
}

fn ordered_ids(bookings: &[Booking]) -> Vec<String> {
    let pool = StopPool::new(bookings);
    let route = select_route(&pool).unwrap();
    route
        .order
        .iter()
        .map(|idx| pool.get(*idx).stop.id.clone())
        .collect()
}

#[test]
fn co_located_dropoffs() {
    let bookings = vec![
        simple_booking(
            "b1",
            ("P1", loc("Alice", 40.7128, -74.0060)),
            ("D1", loc("Drop", 40.8528, -74.0560)),
        ),
        simple_booking(
            "b2",
            ("P2", loc("Bob", 40.8128, -74.0060)),
            ("D2", loc("Drop", 40.8528, -74.0560)),
        ),
    ];

    assert_eq!(ordered_ids(&bookings), vec!["P1", "P2", "D1", "D2"]);
}

#[test]
fn dublin_shared_destination() {
    let bookings = vec![
        simple_booking(
            "b1",
            ("pickup1", loc("North Wall, Dublin", 53.3489, -6.2297)),
            ("dropoff1", loc("Howth Rd, Howth", 53.3853, -6.0735)),
        ),
        simple_booking(
            "b2",
            ("pickup2", loc("Sutton Cross", 53.3917, -6.1133)),
            ("dropoff2", loc("Howth Rd, Howth", 53.3853, -6.0735)),
        ),
    ];

    assert_eq!(
        ordered_ids(&bookings),
        vec!["pickup1", "pickup2", "dropoff1", "dropoff2"]
    );
}

#[test]
fn only_dropoffs_cannot_be_seeded() {
    let bookings = vec![Booking::new(
        "b1",
        vec![Stop::dropoff("d1", loc("X", 0.0, 0.0), "p1")],
    )];
    let pool = StopPool::new(&bookings);

    assert_eq!(select_route(&pool).unwrap_err(), PlanError::NoPickupStops);
}

#[test]
fn seed_is_earliest_scheduled_pickup() {
    let mut b1 = simple_booking(
        "b1",
        ("p1", loc("A", 0.0, 0.0)),
        ("d1", loc("B", 0.0, 0.1)),
    );
    let mut b2 = simple_booking(
        "b2",
        ("p2", loc("C", 1.0, 0.0)),
        ("d2", loc("D", 1.0, 0.1)),
    );
    b1.stops[0].scheduled_time = Some(at(11, 0));
    b2.stops[0].scheduled_time = Some(at(10, 0));

    let bookings = vec![b1, b2];
    let pool = StopPool::new(&bookings);
    let seed = select_seed(&pool).unwrap();
    assert_eq!(pool.get(seed).stop.id, "p2");
}

#[test]
fn timed_pickup_beats_asap_pickup() {
    let b1 = simple_booking(
        "b1",
        ("asap", loc("A", 0.0, 0.0)),
        ("d1", loc("B", 0.0, 0.1)),
    );
    let mut b2 = simple_booking(
        "b2",
        ("timed", loc("C", 1.0, 0.0)),
        ("d2", loc("D", 1.0, 0.1)),
    );
    b2.stops[0].scheduled_time = Some(at(23, 59));

    let bookings = vec![b1, b2];
    let pool = StopPool::new(&bookings);
    let seed = select_seed(&pool).unwrap();
    assert_eq!(pool.get(seed).stop.id, "timed");
}

#[test]
fn equal_times_break_by_submission_order() {
    let mut b1 = simple_booking(
        "b1",
        ("first", loc("A", 5.0, 5.0)),
        ("d1", loc("B", 0.0, 0.1)),
    );
    let mut b2 = simple_booking(
        "b2",
        ("second", loc("C", 0.0, 0.0)),
        ("d2", loc("D", 1.0, 0.1)),
    );
    b1.stops[0].scheduled_time = Some(at(9, 0));
    b2.stops[0].scheduled_time = Some(at(9, 0));

    let bookings = vec![b1, b2];
    let pool = StopPool::new(&bookings);
    let seed = select_seed(&pool).unwrap();
    assert_eq!(pool.get(seed).stop.id, "first");
}

#[test]
fn dropoff_waits_for_its_pickup() {
    let bookings = vec![
        simple_booking(
            "b1",
            ("p1", loc("A", 0.0, 0.0)),
            ("d1", loc("B", 0.0, 0.5)),
        ),
        simple_booking(
            "b2",
            ("p2", loc("C", 0.0, 1.0)),
            ("d2", loc("D", 0.0, 0.0001)),
        ),
    ];

    // d2 is closest to p1, but its passenger is not on board yet.
    assert_eq!(ordered_ids(&bookings), vec!["p1", "d1", "p2", "d2"]);
}

#[test]
fn multi_stop_booking_with_via() {
    let bookings = vec![Booking::new(
        "b1",
        vec![
            Stop::pickup("p1", loc("A", 0.0, 0.0)),
            Stop::pickup("p2", loc("B", 0.0, 0.2)),
            Stop::dropoff("d2", loc("C", 0.0, 0.3), "p2"),
            Stop::dropoff("d1", loc("D", 0.0, 0.1), "p1"),
        ],
    )];

    assert_eq!(ordered_ids(&bookings), vec!["p1", "d1", "p2", "d2"]);
}

#[test]
fn stranded_dropoff_falls_back_to_pool_order() {
    let bookings = vec![
        simple_booking(
            "b1",
            ("p1", loc("A", 0.0, 0.0)),
            ("d1", loc("B", 0.0, 0.1)),
        ),
        Booking::new(
            "b2",
            vec![
                Stop::dropoff("orphan1", loc("C", 0.0, 0.2), "ghost"),
                Stop::dropoff("orphan2", loc("D", 0.0, 0.05), "ghost"),
            ],
        ),
    ];
    let pool = StopPool::new(&bookings);
    let route = select_route(&pool).unwrap();

    let ids: Vec<&str> = route
        .order
        .iter()
        .map(|idx| pool.get(*idx).stop.id.as_str())
        .collect();
    assert_eq!(ids, vec!["p1", "d1", "orphan1", "orphan2"]);
    assert!(route.is_degraded());
    assert_eq!(route.stranded, vec![PoolIndex(2), PoolIndex(3)]);
}

#[test]
fn well_formed_route_is_not_degraded() {
    let bookings = vec![simple_booking(
        "b1",
        ("p1", loc("A", 0.0, 0.0)),
        ("d1", loc("B", 0.0, 0.1)),
    )];
    let pool = StopPool::new(&bookings);
    let route = select_route(&pool).unwrap();
    assert!(!route.is_degraded());
    assert_eq!(route.order, vec![PoolIndex(0), PoolIndex(1)]);
}

#[test]
fn equidistant_candidates_keep_pool_order() {
    let bookings = vec![
        simple_booking(
            "b1",
            ("p1", loc("Centre", 0.0, 0.0)),
            ("d1", loc("Far", 0.0, 5.0)),
        ),
        simple_booking(
            "b2",
            ("north", loc("N", 0.1, 0.0)),
            ("d2", loc("Far", 0.0, 5.0)),
        ),
        simple_booking(
            "b3",
            ("south", loc("S", -0.1, 0.0)),
            ("d3", loc("Far", 0.0, 5.0)),
        ),
    ];

    let ids = ordered_ids(&bookings);
    assert_eq!(ids[0], "p1");
    assert_eq!(ids[1], "north");
}

mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Build bookings from generated (pickup, dropoff, optional time) data.
    fn make_bookings(data: &[((f64, f64), (f64, f64), Option<u32>)]) -> Vec<Booking> {
        data.iter()
            .enumerate()
            .map(|(i, (pick, dest, mins))| {
                let pickup_id = format!("p{i}");
                let mut pickup = Stop::pickup(&pickup_id, loc("p", pick.0, pick.1));
                pickup.scheduled_time =
                    mins.map(|m| at(0, 0) + chrono::Duration::minutes(m as i64));
                Booking::new(
                    format!("b{i}"),
                    vec![
                        pickup,
                        Stop::dropoff(format!("d{i}"), loc("d", dest.0, dest.1), pickup_id),
                    ],
                )
            })
            .collect()
    }

    fn booking_data() -> impl Strategy<Value = Vec<((f64, f64), (f64, f64), Option<u32>)>> {
        prop::collection::vec(
            (
                (53.0f64..54.0, -7.0f64..-6.0),
                (53.0f64..54.0, -7.0f64..-6.0),
                prop::option::of(0u32..1440),
            ),
            1..8,
        )
    }

    proptest! {
        /// Property: every pickup precedes its dropoff.
        #[test]
        fn pickups_precede_dropoffs(data in booking_data()) {
            let bookings = make_bookings(&data);
            let pool = StopPool::new(&bookings);
            let route = select_route(&pool).unwrap();

            let position: HashMap<&str, usize> = route
                .order
                .iter()
                .enumerate()
                .map(|(pos, idx)| (pool.get(*idx).stop.id.as_str(), pos))
                .collect();

            for (_, entry) in pool.iter() {
                if let Some(pickup_id) = entry.stop.corresponding_pickup_id.as_deref() {
                    prop_assert!(
                        position[pickup_id] < position[entry.stop.id.as_str()],
                        "{} visited before its pickup {}",
                        entry.stop.id,
                        pickup_id
                    );
                }
            }
            prop_assert!(!route.is_degraded());
        }

        /// Property: every stop appears exactly once.
        #[test]
        fn route_is_complete(data in booking_data()) {
            let bookings = make_bookings(&data);
            let pool = StopPool::new(&bookings);
            let route = select_route(&pool).unwrap();

            let mut seen = route.order.clone();
            seen.sort();
            let expected: Vec<PoolIndex> = (0..pool.len()).map(PoolIndex).collect();
            prop_assert_eq!(seen, expected);
        }

        /// Property: identical input gives an identical route.
        #[test]
        fn deterministic(data in booking_data()) {
            let bookings = make_bookings(&data);
            let pool = StopPool::new(&bookings);
            let first = select_route(&pool).unwrap();
            let second = select_route(&StopPool::new(&bookings)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
