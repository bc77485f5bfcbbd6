//! Round-based earliest-arrival search over the transit graph.
//!
//! Round `k` extends the best journeys known after `k - 1` vehicle rides by
//! one more ride, then relaxes foot transfers out of every stop the ride
//! improved. Walking never consumes a round. The search is a pure function
//! of the graph: it performs no I/O, mutates nothing shared, and keeps no
//! state between calls.

mod path;
mod state;

pub(crate) use path::*;
pub use state::SearchState;

use crate::{
    graph::{ServiceDay, TransitGraph},
    journey::Journey,
    shared::time::{Duration, Time},
};
use state::{Label, UNREACHED};
use std::mem;

/// Ceiling on vehicle rides per journey. Six rides covers any sane trip
/// across the network and keeps the worst case bounded.
pub const MAX_ROUNDS: usize = 6;

/// One earliest-arrival query.
///
/// Sources carry the walking cost to reach them from the rider's actual
/// position; each is treated as reachable at `departure + walk`. The
/// search answers with the journey arriving earliest at any target, using
/// at most [`MAX_ROUNDS`] rides, or `None` when no target is reachable.
/// Among equal arrival times the journey with fewer rides wins.
pub struct Raptor<'a> {
    graph: &'a TransitGraph,
    sources: Vec<(u32, Duration)>,
    targets: Vec<u32>,
    departure: Time,
    service: ServiceDay,
}

#[derive(Clone, Copy)]
struct Boarding {
    trip_idx: u32,
    board_stop: u32,
    board_pos: u32,
    board_time: Time,
}

impl<'a> Raptor<'a> {
    pub fn new(graph: &'a TransitGraph, sources: Vec<(u32, Duration)>, targets: Vec<u32>) -> Self {
        Self {
            graph,
            sources,
            targets,
            departure: Time::from_seconds(0),
            service: ServiceDay::Weekday,
        }
    }

    /// Sets the earliest time the journey can begin.
    pub fn departure_at(mut self, departure: Time) -> Self {
        self.departure = departure;
        self
    }

    /// Restricts the search to trips running under this service day. Only
    /// the three concrete days exist here; any weekend fallback is the
    /// caller's business.
    pub fn on_service(mut self, service: ServiceDay) -> Self {
        self.service = service;
        self
    }

    /// Runs the search with freshly allocated scratch state.
    pub fn solve(self) -> Option<Journey> {
        let mut state = SearchState::new(self.graph);
        self.solve_with_state(&mut state)
    }

    /// Runs the search reusing caller-owned scratch state, skipping the
    /// allocation cost on hot paths.
    pub fn solve_with_state(self, state: &mut SearchState) -> Option<Journey> {
        state.reset();
        self.seed_sources(state);

        let mut rounds_run = 0;
        for k in 1..=MAX_ROUNDS {
            if state.marked.not_any() {
                break;
            }
            rounds_run = k;
            state.inherit_round(k);

            self.accumulate_routes(state);
            self.scan_routes(state, k);
            self.relax_transfers(state, k);
        }

        let (target, round) = self.best_target(state, rounds_run)?;
        let steps = path::backtrack(state, target, round);
        if steps.is_empty() {
            // The target was already in the source set; standing still is
            // not a journey.
            return None;
        }
        Some(Journey::assemble(self.graph, &steps))
    }

    /// Round 0: sources at `departure + walk`, plus one foot transfer out
    /// of each source so a journey may begin (or wholly consist of) a walk.
    fn seed_sources(&self, state: &mut SearchState) {
        for &(stop, walk) in &self.sources {
            let at = self.departure + walk;
            if at < state.arrival(0, stop) {
                state.set_arrival(0, stop, at);
                state.marked.set(stop as usize, true);
            }
        }
        for &(stop, _) in &self.sources {
            let depart = state.arrival(0, stop);
            for transfer in self.graph.transfers_from(stop) {
                let at = depart + transfer.duration;
                if at < state.arrival(0, transfer.to_stop) {
                    state.set_arrival(0, transfer.to_stop, at);
                    state.set_label(
                        0,
                        transfer.to_stop,
                        Label::Walk {
                            from_stop: stop,
                            depart,
                        },
                    );
                    state.marked.set(transfer.to_stop as usize, true);
                }
            }
        }
    }

    /// Collects the routes serving marked stops, keeping only the earliest
    /// position each route is entered at, so a route is scanned at most
    /// once per round.
    fn accumulate_routes(&self, state: &mut SearchState) {
        let mut marked = mem::take(&mut state.marked);
        for stop in marked.iter_ones() {
            for serving in self.graph.routes_at(stop as u32) {
                let r = serving.route_idx as usize;
                if !state.entry_mask[r] || serving.position < state.entry[r] {
                    state.entry[r] = serving.position;
                    state.entry_mask.set(r, true);
                }
            }
        }
        marked.fill(false);
        state.marked = marked;
    }

    fn scan_routes(&self, state: &mut SearchState, k: usize) {
        let entry_mask = mem::take(&mut state.entry_mask);
        for r in entry_mask.iter_ones() {
            let entry = state.entry[r];
            self.scan_route(state, k, r as u32, entry);
        }
        state.entry_mask = entry_mask;
        state.entry_mask.fill(false);
    }

    /// Sweeps one route from its entry position, riding the best trip
    /// found so far and hopping to an earlier one whenever the previous
    /// round reached a stop in time to catch it.
    fn scan_route(&self, state: &mut SearchState, k: usize, route_idx: u32, entry: u32) {
        let route = self.graph.route(route_idx);
        let mut boarded: Option<Boarding> = None;

        for i in entry as usize..route.stops.len() {
            let stop = route.stops[i];

            if let Some(b) = boarded {
                let arrive = self.graph.trip_time(b.trip_idx, i).arrival;
                if arrive < state.arrival(k, stop) {
                    state.set_arrival(k, stop, arrive);
                    state.set_label(
                        k,
                        stop,
                        Label::Ride {
                            from_stop: b.board_stop,
                            route_idx,
                            trip_idx: b.trip_idx,
                            board_time: b.board_time,
                            board_pos: b.board_pos,
                            alight_pos: i as u32,
                        },
                    );
                    state.marked.set(stop as usize, true);
                    state.improved.set(stop as usize, true);
                }
            }

            let reached = state.arrival(k - 1, stop);
            if reached == UNREACHED {
                continue;
            }
            let boarded_dep = match boarded {
                Some(b) => self.graph.trip_time(b.trip_idx, i).departure,
                None => UNREACHED,
            };
            if reached <= boarded_dep
                && let Some((trip_idx, depart)) = self.earliest_trip(route_idx, i, reached)
                && depart < boarded_dep
            {
                boarded = Some(Boarding {
                    trip_idx,
                    board_stop: stop,
                    board_pos: i as u32,
                    board_time: depart,
                });
            }
        }
    }

    /// Earliest trip of the route departing `position` at or after `bound`,
    /// on the requested service day. Trips are stored in ascending
    /// first-departure order, so the first hit wins; that order is also
    /// the deterministic tie-break between trips departing together.
    fn earliest_trip(&self, route_idx: u32, position: usize, bound: Time) -> Option<(u32, Time)> {
        for &trip_idx in self.graph.trips_of_route(route_idx) {
            let trip = self.graph.trip(trip_idx);
            if trip.service != self.service {
                continue;
            }
            let depart = self.graph.trip_time(trip_idx, position).departure;
            if depart >= bound {
                return Some((trip_idx, depart));
            }
        }
        None
    }

    /// Relaxes foot transfers out of every stop a vehicle improved this
    /// round. Walks feed the next round's boarding but are not chained.
    fn relax_transfers(&self, state: &mut SearchState, k: usize) {
        let improved = mem::take(&mut state.improved);
        for stop in improved.iter_ones() {
            let depart = state.arrival(k, stop as u32);
            for transfer in self.graph.transfers_from(stop as u32) {
                let at = depart + transfer.duration;
                if at < state.arrival(k, transfer.to_stop) {
                    state.set_arrival(k, transfer.to_stop, at);
                    state.set_label(
                        k,
                        transfer.to_stop,
                        Label::Walk {
                            from_stop: stop as u32,
                            depart,
                        },
                    );
                    state.marked.set(transfer.to_stop as usize, true);
                }
            }
        }
        state.improved = improved;
        state.improved.fill(false);
    }

    /// The target with the minimum arrival over every executed round;
    /// among equal times the smallest round (fewest rides) wins.
    fn best_target(&self, state: &SearchState, rounds_run: usize) -> Option<(u32, usize)> {
        let mut best = UNREACHED;
        let mut found: Option<(u32, usize)> = None;
        for k in 1..=rounds_run {
            for &target in &self.targets {
                let at = state.arrival(k, target);
                if at < best {
                    best = at;
                    found = Some((target, k));
                }
            }
        }
        found
    }
}
