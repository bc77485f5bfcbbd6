use crate::{
    graph::{
        GraphConfig, Route, RouteAtStop, ServiceDay, Slice, Stop, StopTime, Transfer, TransitGraph,
        Trip, TransitMode,
    },
    shared::{
        geo::{Coordinate, Distance},
        time::{Duration, Time},
    },
    store::{LineMetaRow, ProximityRow, StopRow},
};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Staged construction of a [`TransitGraph`].
///
/// The loader feeds it rows straight from the store; tests feed it literal
/// rows. Stages must run in order: stops, then patterns, then trips and
/// transfer pairs, then [`finish`](GraphBuilder::finish).
pub struct GraphBuilder {
    config: GraphConfig,
    stops: Vec<Stop>,
    stop_lookup: HashMap<i64, u32>,
    routes: Vec<Route>,
    trips: Vec<Trip>,
    stop_times: Vec<StopTime>,
    route_trips: Vec<Vec<u32>>,
    transfers: Vec<Vec<Transfer>>,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            stops: Vec::new(),
            stop_lookup: HashMap::new(),
            routes: Vec::new(),
            trips: Vec::new(),
            stop_times: Vec::new(),
            route_trips: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Registers every stop, assigning dense indices in row order.
    pub fn add_stops(&mut self, rows: Vec<StopRow>) {
        self.stops.reserve(rows.len());
        self.stop_lookup.reserve(rows.len());
        for row in rows {
            let index = self.stops.len() as u32;
            self.stop_lookup.insert(row.id, index);
            self.stops.push(Stop {
                index,
                id: row.id,
                code: row.code.into(),
                name: row.name.into(),
                coordinate: Coordinate::new(row.lat, row.lon),
            });
        }
        self.transfers = vec![Vec::new(); self.stops.len()];
    }

    /// Registers one (line, direction) pattern as a route.
    ///
    /// Returns the new route index, or `None` when the pattern is unusable:
    /// missing line metadata, fewer than two stops resolvable against the
    /// stop table, or a stop appearing twice. Unusable patterns are logged
    /// and dropped; they must not take the whole load down.
    pub fn add_pattern(
        &mut self,
        line_id: i64,
        direction: i16,
        meta: Option<LineMetaRow>,
        stop_ids: &[i64],
    ) -> Option<u32> {
        let Some(meta) = meta else {
            warn!(line_id, direction, "skipping pattern: line metadata missing");
            return None;
        };

        let stops: Vec<u32> = stop_ids
            .iter()
            .filter_map(|id| self.stop_lookup.get(id).copied())
            .collect();
        if stops.len() < 2 {
            warn!(
                line_id,
                direction,
                resolved = stops.len(),
                "skipping pattern: fewer than two resolvable stops"
            );
            return None;
        }
        let mut seen: HashSet<u32> = HashSet::with_capacity(stops.len());
        if stops.iter().any(|stop| !seen.insert(*stop)) {
            warn!(line_id, direction, "skipping pattern: stop repeats in sequence");
            return None;
        }

        let mode = TransitMode::parse(&meta.line_type).unwrap_or_else(|| {
            warn!(line_id, line_type = %meta.line_type, "unknown line type, treating as bus");
            TransitMode::default()
        });

        let index = self.routes.len() as u32;
        self.routes.push(Route {
            index,
            line_id,
            direction: direction as u8,
            code: meta.code.into(),
            mode,
            color: meta.color.into(),
            fare_class: mode.fare_class(),
            stops: stops.into(),
        });
        self.route_trips.push(Vec::new());
        Some(index)
    }

    /// Store id of a route's first stop, for fetching its schedule.
    pub fn first_stop_store_id(&self, route_idx: u32) -> i64 {
        let first = self.routes[route_idx as usize].stops[0];
        self.stops[first as usize].id
    }

    /// Synthesizes one trip per first-stop departure.
    ///
    /// Until measured inter-stop durations reach the store, each trip's
    /// per-stop times are derived by stepping `inter_stop_seconds` from the
    /// first-stop departure, with zero dwell.
    pub fn add_trips(&mut self, route_idx: u32, service: ServiceDay, departures: &[Time]) {
        let stop_count = self.routes[route_idx as usize].stops.len();
        let step = Duration::from_seconds(self.config.inter_stop_seconds);

        let schedules: Vec<Vec<StopTime>> = departures
            .par_iter()
            .map(|first| {
                let mut at = *first;
                let mut times = Vec::with_capacity(stop_count);
                for _ in 0..stop_count {
                    times.push(StopTime {
                        arrival: at,
                        departure: at,
                    });
                    at += step;
                }
                times
            })
            .collect();

        for (first, times) in departures.iter().zip(schedules) {
            let trip_idx = self.trips.len() as u32;
            let slice = Slice {
                start_idx: self.stop_times.len() as u32,
                count: times.len() as u32,
            };
            self.stop_times.extend(times);
            self.trips.push(Trip {
                index: trip_idx,
                route_idx,
                service,
                first_departure: *first,
                times: slice,
            });
            self.route_trips[route_idx as usize].push(trip_idx);
        }
    }

    /// Turns the store's proximity scan into directed foot transfers.
    pub fn add_transfer_pairs(&mut self, rows: &[ProximityRow]) {
        for row in rows {
            if row.from_id == row.to_id {
                continue;
            }
            let (Some(from), Some(to)) = (
                self.stop_lookup.get(&row.from_id).copied(),
                self.stop_lookup.get(&row.to_id).copied(),
            ) else {
                debug!(from = row.from_id, to = row.to_id, "dropping transfer pair: unknown stop");
                continue;
            };
            let duration =
                Distance::from_meters(row.meters).walk_time(self.config.walk_speed_mps);
            self.transfers[from as usize].push(Transfer {
                from_stop: from,
                to_stop: to,
                duration,
            });
        }
    }

    /// Freezes the graph: orders each route's trips by first-stop departure
    /// and derives the per-stop adjacency tables. No mutation after this.
    pub fn finish(mut self) -> TransitGraph {
        let trips = &self.trips;
        self.route_trips
            .par_iter_mut()
            .for_each(|list| list.sort_by_key(|&t| (trips[t as usize].first_departure, t)));

        let mut stop_routes: Vec<Vec<RouteAtStop>> = vec![Vec::new(); self.stops.len()];
        for route in &self.routes {
            for (position, &stop) in route.stops.iter().enumerate() {
                stop_routes[stop as usize].push(RouteAtStop {
                    route_idx: route.index,
                    position: position as u32,
                });
            }
        }

        TransitGraph {
            stops: self.stops.into(),
            routes: self.routes.into(),
            trips: self.trips.into(),
            stop_times: self.stop_times.into(),
            stop_lookup: self.stop_lookup,
            route_trips: self
                .route_trips
                .into_iter()
                .map(|list| list.into())
                .collect(),
            stop_routes: stop_routes.into_iter().map(|list| list.into()).collect(),
            stop_transfers: self.transfers.into_iter().map(|list| list.into()).collect(),
        }
    }
}
