use wayfare::graph::{GraphBuilder, GraphConfig, ServiceDay, TransitMode};
use wayfare::shared::time::Time;
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

fn meta(code: &str, line_type: &str, color: &str) -> LineMetaRow {
    LineMetaRow {
        code: code.to_string(),
        line_type: line_type.to_string(),
        color: color.to_string(),
    }
}

fn hms(value: &str) -> Time {
    Time::from_hms(value).unwrap()
}

fn three_stops(builder: &mut GraphBuilder) {
    builder.add_stops(vec![
        stop_row(1, "A", 0.0, 0.0),
        stop_row(2, "B", 0.0, 0.01),
        stop_row(3, "C", 0.0, 0.02),
    ]);
}

#[test]
fn stops_get_dense_indices_and_lookup_roundtrips() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    let graph = builder.finish();

    assert_eq!(graph.stop_count(), 3);
    for (expected, store_id) in [(0u32, 1i64), (1, 2), (2, 3)] {
        let stop = graph.stop_by_store_id(store_id).unwrap();
        assert_eq!(stop.index, expected);
        assert_eq!(stop.id, store_id);
    }
    assert!(graph.stop_by_store_id(99).is_none());
}

#[test]
fn pattern_without_metadata_is_skipped() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    assert!(builder.add_pattern(10, 0, None, &[1, 2, 3]).is_none());
    let graph = builder.finish();
    assert_eq!(graph.route_count(), 0);
}

#[test]
fn pattern_with_one_resolvable_stop_is_skipped() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    let result = builder.add_pattern(10, 0, Some(meta("L1", "bus", "#FF0000")), &[1, 98, 99]);
    assert!(result.is_none());
}

#[test]
fn unknown_stop_ids_are_dropped_from_the_sequence() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    let route = builder
        .add_pattern(10, 0, Some(meta("L1", "bus", "#FF0000")), &[1, 99, 3])
        .unwrap();
    let graph = builder.finish();
    assert_eq!(&*graph.route(route).stops, &[0, 2]);
}

#[test]
fn pattern_with_repeated_stop_is_skipped() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    let result = builder.add_pattern(10, 0, Some(meta("L1", "bus", "#FF0000")), &[1, 2, 1]);
    assert!(result.is_none());
}

#[test]
fn line_type_maps_to_mode_and_fare_class() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    let tram = builder
        .add_pattern(10, 0, Some(meta("T1", "tram", "#0055A4")), &[1, 2])
        .unwrap();
    let bus = builder
        .add_pattern(20, 0, Some(meta("L1", "bus", "#FF0000")), &[2, 3])
        .unwrap();
    let odd = builder
        .add_pattern(30, 0, Some(meta("G1", "gondola", "#00FF00")), &[1, 3])
        .unwrap();
    let graph = builder.finish();

    assert_eq!(graph.route(tram).mode, TransitMode::Tram);
    assert_eq!(graph.route(tram).fare_class, 2);
    assert_eq!(graph.route(bus).mode, TransitMode::Bus);
    assert_eq!(graph.route(bus).fare_class, 1);
    // An unrecognized type keeps the line in the network as a bus.
    assert_eq!(graph.route(odd).mode, TransitMode::Bus);
}

#[test]
fn trips_are_sorted_by_first_departure() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    let route = builder
        .add_pattern(10, 0, Some(meta("L1", "bus", "#FF0000")), &[1, 2, 3])
        .unwrap();
    builder.add_trips(
        route,
        ServiceDay::Weekday,
        &[hms("09:00:00"), hms("08:00:00"), hms("08:30:00")],
    );
    let graph = builder.finish();

    let departures: Vec<Time> = graph
        .trips_of_route(route)
        .iter()
        .map(|&trip_idx| graph.trip(trip_idx).first_departure)
        .collect();
    assert_eq!(
        departures,
        vec![hms("08:00:00"), hms("08:30:00"), hms("09:00:00")]
    );
}

#[test]
fn trip_times_step_by_the_configured_duration() {
    let config = GraphConfig {
        inter_stop_seconds: 300,
        ..GraphConfig::default()
    };
    let mut builder = GraphBuilder::new(config);
    three_stops(&mut builder);
    let route = builder
        .add_pattern(10, 0, Some(meta("L1", "bus", "#FF0000")), &[1, 2, 3])
        .unwrap();
    builder.add_trips(route, ServiceDay::Weekday, &[hms("08:00:00")]);
    let graph = builder.finish();

    let trip_idx = graph.trips_of_route(route)[0];
    let times = graph.stop_times_of_trip(trip_idx);
    assert_eq!(times.len(), 3);
    let expected = [hms("08:00:00"), hms("08:05:00"), hms("08:10:00")];
    for (time, want) in times.iter().zip(expected) {
        assert_eq!(time.arrival, want);
        assert_eq!(time.departure, want);
    }
}

#[test]
fn proximity_pairs_become_directed_transfers() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    builder.add_transfer_pairs(&[
        ProximityRow {
            from_id: 1,
            to_id: 2,
            meters: 120.4,
        },
        ProximityRow {
            from_id: 2,
            to_id: 1,
            meters: 120.4,
        },
        // Self pairs and unknown stops never become transfers.
        ProximityRow {
            from_id: 1,
            to_id: 1,
            meters: 0.0,
        },
        ProximityRow {
            from_id: 1,
            to_id: 77,
            meters: 50.0,
        },
    ]);
    let graph = builder.finish();

    assert_eq!(graph.transfer_count(), 2);
    let out = graph.transfers_from(0);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].to_stop, 1);
    assert_eq!(out[0].duration.as_seconds(), 120);
    assert_eq!(graph.transfers_from(2).len(), 0);
}

#[test]
fn routes_at_stop_carry_positions() {
    let mut builder = GraphBuilder::new(GraphConfig::default());
    three_stops(&mut builder);
    builder
        .add_pattern(10, 0, Some(meta("L1", "bus", "#FF0000")), &[1, 2, 3])
        .unwrap();
    builder
        .add_pattern(10, 1, Some(meta("L1", "bus", "#FF0000")), &[3, 2, 1])
        .unwrap();
    let graph = builder.finish();

    let at_b = graph.routes_at(1);
    assert_eq!(at_b.len(), 2);
    for serving in at_b {
        assert_eq!(serving.position, 1);
    }
    let at_c = graph.routes_at(2);
    let positions: Vec<(u32, u32)> = at_c
        .iter()
        .map(|serving| (serving.route_idx, serving.position))
        .collect();
    assert!(positions.contains(&(0, 2)));
    assert!(positions.contains(&(1, 0)));
}
