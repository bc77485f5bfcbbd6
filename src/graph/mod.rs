mod build;
mod config;
mod entities;

pub use build::*;
pub use config::*;
pub use entities::*;

use std::collections::HashMap;

/// The immutable transit network, flattened for the routing engine.
///
/// Built once at startup by [`GraphBuilder`] and never mutated afterwards,
/// which is what lets concurrent searches share it by plain reference
/// without any locking. All entities live in dense `Box<[T]>` tables and
/// refer to each other by index; the adjacency tables below are precomputed
/// so the search never scans a route's stop list to find a position.
#[derive(Debug, Default)]
pub struct TransitGraph {
    pub stops: Box<[Stop]>,
    pub routes: Box<[Route]>,
    pub trips: Box<[Trip]>,
    stop_times: Box<[StopTime]>,

    /// Store id -> dense stop index. The inverse is `stops[idx].id`.
    stop_lookup: HashMap<i64, u32>,
    /// Per route: trip indices sorted by first-stop departure.
    route_trips: Box<[Box<[u32]>]>,
    /// Per stop: every route calling there and the stop's position in it.
    stop_routes: Box<[Box<[RouteAtStop]>]>,
    /// Per stop: outgoing foot transfers.
    stop_transfers: Box<[Box<[Transfer]>]>,
}

impl TransitGraph {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn transfer_count(&self) -> usize {
        self.stop_transfers.iter().map(|list| list.len()).sum()
    }

    pub fn stop(&self, stop_idx: u32) -> &Stop {
        &self.stops[stop_idx as usize]
    }

    pub fn route(&self, route_idx: u32) -> &Route {
        &self.routes[route_idx as usize]
    }

    pub fn trip(&self, trip_idx: u32) -> &Trip {
        &self.trips[trip_idx as usize]
    }

    /// Resolves a store id to the graph stop, if it made it into the graph.
    pub fn stop_by_store_id(&self, id: i64) -> Option<&Stop> {
        let stop_idx = self.stop_lookup.get(&id)?;
        Some(&self.stops[*stop_idx as usize])
    }

    /// Routes calling at a stop, each with the stop's position in it.
    pub fn routes_at(&self, stop_idx: u32) -> &[RouteAtStop] {
        &self.stop_routes[stop_idx as usize]
    }

    /// Trip indices of a route, sorted by first-stop departure.
    pub fn trips_of_route(&self, route_idx: u32) -> &[u32] {
        &self.route_trips[route_idx as usize]
    }

    /// The full schedule of one trip, one entry per route stop.
    pub fn stop_times_of_trip(&self, trip_idx: u32) -> &[StopTime] {
        let slice = self.trips[trip_idx as usize].times;
        let start = slice.start_idx as usize;
        &self.stop_times[start..start + slice.count as usize]
    }

    /// Arrival/departure of a trip at one position along its route.
    pub fn trip_time(&self, trip_idx: u32, position: usize) -> StopTime {
        self.stop_times_of_trip(trip_idx)[position]
    }

    pub fn transfers_from(&self, stop_idx: u32) -> &[Transfer] {
        &self.stop_transfers[stop_idx as usize]
    }
}
