use crate::{
    graph::TransitGraph,
    raptor::MAX_ROUNDS,
    shared::{time, time::Time},
};
use bitvec::prelude::*;

/// Arrival value meaning "not reached".
pub(crate) const UNREACHED: Time = time::MAX;

/// Back-pointer recorded whenever a round improves a stop.
///
/// The tagged form keeps reconstruction honest: a foot transfer and a
/// vehicle ride carry different payloads, and the positions stored on a
/// ride let the journey be rebuilt without searching the route again.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Label {
    Walk {
        from_stop: u32,
        depart: Time,
    },
    Ride {
        from_stop: u32,
        route_idx: u32,
        trip_idx: u32,
        board_time: Time,
        board_pos: u32,
        alight_pos: u32,
    },
}

/// Scratch memory for one search.
///
/// Pre-allocates the full round tables so the hot loop never touches the
/// heap. A long-running server keeps one of these per task and calls
/// [`Raptor::solve_with_state`](crate::raptor::Raptor::solve_with_state)
/// to reuse it; [`reset`](SearchState::reset) makes it good for the next
/// query. Must only be used with the graph it was sized for.
pub struct SearchState {
    /// Flattened `(round, stop)` matrix of best known arrivals.
    arrivals: Vec<Time>,
    /// Flattened `(round, stop)` matrix of back-pointers.
    labels: Vec<Option<Label>>,
    /// Stops whose arrival improved and that seed the next round.
    pub(crate) marked: BitVec<usize, Lsb0>,
    /// Stops improved by a vehicle in the current round; only these get
    /// their outgoing transfers relaxed.
    pub(crate) improved: BitVec<usize, Lsb0>,
    /// Earliest position at which the current round enters each route.
    pub(crate) entry: Vec<u32>,
    pub(crate) entry_mask: BitVec<usize, Lsb0>,
    stop_count: usize,
}

impl SearchState {
    pub fn new(graph: &TransitGraph) -> Self {
        let stop_count = graph.stop_count();
        Self {
            arrivals: vec![UNREACHED; stop_count * (MAX_ROUNDS + 1)],
            labels: vec![None; stop_count * (MAX_ROUNDS + 1)],
            marked: bitvec!(usize, Lsb0; 0; stop_count),
            improved: bitvec!(usize, Lsb0; 0; stop_count),
            entry: vec![u32::MAX; graph.route_count()],
            entry_mask: bitvec!(usize, Lsb0; 0; graph.route_count()),
            stop_count,
        }
    }

    /// Clears every table so the state can serve a fresh search.
    pub fn reset(&mut self) {
        self.arrivals.fill(UNREACHED);
        self.labels.fill(None);
        self.marked.fill(false);
        self.improved.fill(false);
        self.entry.fill(u32::MAX);
        self.entry_mask.fill(false);
    }

    pub(crate) fn arrival(&self, round: usize, stop: u32) -> Time {
        self.arrivals[flat_index(round, stop as usize, self.stop_count)]
    }

    pub(crate) fn set_arrival(&mut self, round: usize, stop: u32, at: Time) {
        self.arrivals[flat_index(round, stop as usize, self.stop_count)] = at;
    }

    pub(crate) fn label(&self, round: usize, stop: u32) -> Option<Label> {
        self.labels[flat_index(round, stop as usize, self.stop_count)]
    }

    pub(crate) fn set_label(&mut self, round: usize, stop: u32, label: Label) {
        self.labels[flat_index(round, stop as usize, self.stop_count)] = Some(label);
    }

    /// Seeds a round with the previous round's arrivals, so every round
    /// starts from the best already known.
    pub(crate) fn inherit_round(&mut self, round: usize) {
        let from = flat_index(round - 1, 0, self.stop_count);
        let to = flat_index(round, 0, self.stop_count);
        self.arrivals.copy_within(from..from + self.stop_count, to);
    }
}

/// Converts a (round, stop) coordinate into an index into the flat tables.
#[inline(always)]
pub(crate) fn flat_index(outer: usize, inner: usize, count: usize) -> usize {
    (outer * count) + inner
}

#[test]
fn flat_index_walks_rows() {
    let a = flat_index(0, 0, 10);
    let b = flat_index(0, 1, 10);
    assert_eq!(a + 1, b);

    let a = flat_index(1, 0, 10);
    let b = flat_index(1, 1, 10);
    assert_eq!(a + 1, b);

    let a = flat_index(0, 3, 10);
    let b = flat_index(1, 3, 10);
    assert_eq!(a + 10, b);
}
