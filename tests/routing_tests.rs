use wayfare::graph::{GraphBuilder, GraphConfig, ServiceDay, TransitGraph};
use wayfare::journey::{Journey, LegKind};
use wayfare::raptor::Raptor;
use wayfare::shared::time::{Duration, Time};
use wayfare::store::{LineMetaRow, ProximityRow, StopRow};

fn stop_row(id: i64, code: &str, lat: f64, lon: f64) -> StopRow {
    StopRow {
        id,
        code: code.to_string(),
        name: format!("Stop {code}"),
        lat,
        lon,
        stop_type: "bus".to_string(),
    }
}

fn meta(code: &str) -> LineMetaRow {
    LineMetaRow {
        code: code.to_string(),
        line_type: "bus".to_string(),
        color: "#FF0000".to_string(),
    }
}

fn hms(value: &str) -> Time {
    Time::from_hms(value).unwrap()
}

fn here(stop: u32) -> Vec<(u32, Duration)> {
    vec![(stop, Duration::from_seconds(0))]
}

fn builder() -> GraphBuilder {
    GraphBuilder::new(GraphConfig {
        inter_stop_seconds: 300,
        ..GraphConfig::default()
    })
}

/// Stops A, B, C in a line; one route over them; one weekday trip leaving
/// A at 08:00 and reaching C at 08:10.
fn linear_graph(departures: &[Time]) -> TransitGraph {
    let mut builder = builder();
    builder.add_stops(vec![
        stop_row(1, "A", 0.0, 0.0),
        stop_row(2, "B", 0.0, 0.01),
        stop_row(3, "C", 0.0, 0.02),
    ]);
    let route = builder
        .add_pattern(10, 0, Some(meta("L1")), &[1, 2, 3])
        .unwrap();
    builder.add_trips(route, ServiceDay::Weekday, departures);
    builder.finish()
}

/// The linear graph plus a second route C' -> D at 08:15 and a 60 s foot
/// transfer between C and C'.
fn transfer_graph() -> TransitGraph {
    let mut builder = builder();
    builder.add_stops(vec![
        stop_row(1, "A", 0.0, 0.0),
        stop_row(2, "B", 0.0, 0.01),
        stop_row(3, "C", 0.0, 0.02),
        stop_row(4, "C'", 0.0005, 0.02),
        stop_row(5, "D", 0.0005, 0.03),
    ]);
    let first = builder
        .add_pattern(10, 0, Some(meta("L1")), &[1, 2, 3])
        .unwrap();
    builder.add_trips(first, ServiceDay::Weekday, &[hms("08:00:00")]);
    let second = builder
        .add_pattern(20, 0, Some(meta("L2")), &[4, 5])
        .unwrap();
    builder.add_trips(second, ServiceDay::Weekday, &[hms("08:15:00")]);
    builder.add_transfer_pairs(&[
        ProximityRow {
            from_id: 3,
            to_id: 4,
            meters: 60.0,
        },
        ProximityRow {
            from_id: 4,
            to_id: 3,
            meters: 60.0,
        },
    ]);
    builder.finish()
}

fn assert_contiguous(journey: &Journey) {
    assert!(!journey.legs.is_empty());
    for pair in journey.legs.windows(2) {
        assert_eq!(pair[0].to_stop, pair[1].from_stop);
        assert!(pair[0].end <= pair[1].start);
    }
    for leg in &journey.legs {
        assert!(leg.start <= leg.end);
        assert_eq!(leg.stops.first().copied(), Some(leg.from_stop));
        assert_eq!(leg.stops.last().copied(), Some(leg.to_stop));
    }
}

#[test]
fn direct_ride_end_to_end() {
    let graph = linear_graph(&[hms("08:00:00")]);
    let journey = Raptor::new(&graph, here(0), vec![2])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve()
        .unwrap();

    assert_eq!(journey.legs.len(), 1);
    let leg = &journey.legs[0];
    assert!(matches!(leg.kind, LegKind::Ride { route_idx: 0, .. }));
    assert_eq!(leg.start, hms("08:00:00"));
    assert_eq!(leg.end, hms("08:10:00"));
    assert_eq!(leg.stops, vec![0, 1, 2]);
    assert_eq!(journey.departure, hms("08:00:00"));
    assert_eq!(journey.arrival, hms("08:10:00"));
    assert_contiguous(&journey);
}

#[test]
fn departed_trip_cannot_be_caught() {
    let graph = linear_graph(&[hms("08:00:00")]);
    let journey = Raptor::new(&graph, here(0), vec![1])
        .departure_at(hms("08:06:00"))
        .on_service(ServiceDay::Weekday)
        .solve();
    assert!(journey.is_none());
}

#[test]
fn no_trips_on_requested_service_day() {
    let graph = linear_graph(&[hms("08:00:00")]);
    let journey = Raptor::new(&graph, here(0), vec![2])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Saturday)
        .solve();
    assert!(journey.is_none());
}

#[test]
fn transfer_connects_two_routes() {
    let graph = transfer_graph();
    let journey = Raptor::new(&graph, here(0), vec![4])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve()
        .unwrap();

    assert_eq!(journey.legs.len(), 3);
    assert_contiguous(&journey);

    let ride_in = &journey.legs[0];
    assert!(matches!(ride_in.kind, LegKind::Ride { route_idx: 0, .. }));
    assert_eq!(ride_in.stops, vec![0, 1, 2]);
    assert_eq!(ride_in.end, hms("08:10:00"));

    let walk = &journey.legs[1];
    assert_eq!(walk.kind, LegKind::Walk);
    assert_eq!((walk.from_stop, walk.to_stop), (2, 3));
    assert_eq!(walk.start, hms("08:10:00"));
    assert_eq!(walk.end, hms("08:11:00"));
    assert_eq!(walk.stops, vec![2, 3]);

    let ride_out = &journey.legs[2];
    assert!(matches!(ride_out.kind, LegKind::Ride { route_idx: 1, .. }));
    assert_eq!(ride_out.start, hms("08:15:00"));
    assert_eq!(ride_out.end, hms("08:20:00"));
    assert_eq!(journey.arrival, hms("08:20:00"));
}

#[test]
fn saturday_misses_but_sunday_runs() {
    let mut builder = builder();
    builder.add_stops(vec![
        stop_row(1, "A", 0.0, 0.0),
        stop_row(2, "B", 0.0, 0.01),
    ]);
    let route = builder
        .add_pattern(10, 0, Some(meta("L1")), &[1, 2])
        .unwrap();
    builder.add_trips(route, ServiceDay::Sunday, &[hms("09:00:00")]);
    let graph = builder.finish();

    // The weekend alias resolves at the boundary: saturday first, then
    // sunday, first success wins.
    let saturday = Raptor::new(&graph, here(0), vec![1])
        .departure_at(hms("08:00:00"))
        .on_service(ServiceDay::Saturday)
        .solve();
    assert!(saturday.is_none());

    let sunday = Raptor::new(&graph, here(0), vec![1])
        .departure_at(hms("08:00:00"))
        .on_service(ServiceDay::Sunday)
        .solve()
        .unwrap();
    assert_eq!(sunday.arrival, hms("09:05:00"));
}

#[test]
fn identical_departures_resolve_deterministically() {
    let graph = linear_graph(&[hms("08:00:00"), hms("08:00:00")]);

    let solve = || {
        Raptor::new(&graph, here(0), vec![2])
            .departure_at(hms("07:55:00"))
            .on_service(ServiceDay::Weekday)
            .solve()
            .unwrap()
    };
    let first = solve();
    let second = solve();

    assert_eq!(first.arrival, hms("08:10:00"));
    assert_eq!(first.arrival, second.arrival);
    assert_eq!(first.legs.len(), second.legs.len());
    // The earlier-inserted trip wins both times.
    assert_eq!(first.legs[0].kind, second.legs[0].kind);
    assert_eq!(
        first.legs[0].kind,
        LegKind::Ride {
            route_idx: 0,
            trip_idx: 0
        }
    );
}

#[test]
fn repeated_queries_agree() {
    let graph = transfer_graph();
    let solve = || {
        Raptor::new(&graph, here(0), vec![4])
            .departure_at(hms("07:55:00"))
            .on_service(ServiceDay::Weekday)
            .solve()
            .unwrap()
    };
    let first = solve();
    let second = solve();
    assert_eq!(first.arrival, second.arrival);
    assert_eq!(first.legs.len(), second.legs.len());
    for (a, b) in first.legs.iter().zip(second.legs.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.start, b.start);
        assert_eq!(a.end, b.end);
    }
}

#[test]
fn journey_can_be_a_single_walk() {
    let mut builder = builder();
    builder.add_stops(vec![
        stop_row(1, "A", 0.0, 0.0),
        stop_row(2, "B", 0.0005, 0.0),
    ]);
    builder.add_transfer_pairs(&[ProximityRow {
        from_id: 1,
        to_id: 2,
        meters: 100.0,
    }]);
    let graph = builder.finish();

    let journey = Raptor::new(&graph, here(0), vec![1])
        .departure_at(hms("08:00:00"))
        .on_service(ServiceDay::Weekday)
        .solve()
        .unwrap();
    assert_eq!(journey.legs.len(), 1);
    assert_eq!(journey.legs[0].kind, LegKind::Walk);
    assert_eq!(journey.departure, hms("08:00:00"));
    assert_eq!(journey.arrival, hms("08:01:40"));
}

#[test]
fn standing_still_is_not_a_journey() {
    let graph = linear_graph(&[hms("08:00:00")]);
    let journey = Raptor::new(&graph, here(0), vec![0])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve();
    assert!(journey.is_none());
}

/// Eight stops chained by seven single-hop routes, each departing ten
/// minutes after the previous so every hop costs one round.
fn chained_graph() -> TransitGraph {
    let mut builder = builder();
    builder.add_stops(
        (1..=8)
            .map(|id| stop_row(id, &format!("S{id}"), 0.0, 0.01 * id as f64))
            .collect(),
    );
    for hop in 0..7i64 {
        let route = builder
            .add_pattern(100 + hop, 0, Some(meta(&format!("H{hop}"))), &[hop + 1, hop + 2])
            .unwrap();
        let departure = hms("08:00:00") + Duration::from_minutes(10 * hop as u32);
        builder.add_trips(route, ServiceDay::Weekday, &[departure]);
    }
    builder.finish()
}

#[test]
fn ride_budget_caps_the_search() {
    let graph = chained_graph();

    // Six rides reach the seventh stop.
    let within = Raptor::new(&graph, here(0), vec![6])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve()
        .unwrap();
    assert_eq!(within.legs.len(), 6);
    assert_eq!(within.arrival, hms("08:55:00"));
    assert_contiguous(&within);

    // The eighth needs a seventh ride and stays unreachable.
    let beyond = Raptor::new(&graph, here(0), vec![7])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve();
    assert!(beyond.is_none());
}

#[test]
fn nearer_target_wins_when_both_sides_resolve() {
    let graph = linear_graph(&[hms("08:00:00")]);
    // Both B and C are acceptable targets; B is reached first.
    let journey = Raptor::new(&graph, here(0), vec![1, 2])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve()
        .unwrap();
    assert_eq!(journey.arrival, hms("08:05:00"));
    assert_eq!(journey.legs.len(), 1);
    assert_eq!(journey.legs[0].to_stop, 1);
}

#[test]
fn scratch_state_reuse_matches_fresh_state() {
    let graph = transfer_graph();
    let mut state = wayfare::raptor::SearchState::new(&graph);

    let fresh = Raptor::new(&graph, here(0), vec![4])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve()
        .unwrap();

    // Run an unrelated query through the shared state, then the original
    // one again; leftovers must not leak between searches.
    let _ = Raptor::new(&graph, here(1), vec![2])
        .departure_at(hms("08:00:00"))
        .on_service(ServiceDay::Weekday)
        .solve_with_state(&mut state);
    let reused = Raptor::new(&graph, here(0), vec![4])
        .departure_at(hms("07:55:00"))
        .on_service(ServiceDay::Weekday)
        .solve_with_state(&mut state)
        .unwrap();

    assert_eq!(fresh.arrival, reused.arrival);
    assert_eq!(fresh.legs.len(), reused.legs.len());
}
