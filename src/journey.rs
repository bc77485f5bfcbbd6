//! The leg-by-leg itinerary a search hands back to its caller.

use crate::{
    graph::TransitGraph,
    raptor::{PathStep, StepKind},
    shared::time::Time,
};

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    /// One vehicle ride on one route.
    Ride { route_idx: u32, trip_idx: u32 },
    /// A foot transfer between two nearby stops.
    Walk,
}

/// A user-visible portion of a journey.
///
/// `stops` is the full stop sequence travelled: for a ride, the route
/// segment from boarding to alighting inclusive; for a walk, its two
/// endpoints.
#[derive(Debug, Clone)]
pub struct Leg {
    pub kind: LegKind,
    pub from_stop: u32,
    pub to_stop: u32,
    pub start: Time,
    pub end: Time,
    pub stops: Vec<u32>,
}

/// An ordered, non-empty chain of legs, contiguous in time and space:
/// each leg starts where and no earlier than the previous one ended.
#[derive(Debug, Clone)]
pub struct Journey {
    pub legs: Vec<Leg>,
    pub departure: Time,
    pub arrival: Time,
}

impl Journey {
    pub(crate) fn assemble(graph: &TransitGraph, steps: &[PathStep]) -> Self {
        let legs: Vec<Leg> = steps
            .iter()
            .map(|step| {
                let (kind, stops) = match step.kind {
                    StepKind::Ride {
                        route_idx,
                        trip_idx,
                        board_pos,
                        alight_pos,
                    } => {
                        let route = graph.route(route_idx);
                        let segment =
                            route.stops[board_pos as usize..=alight_pos as usize].to_vec();
                        (LegKind::Ride { route_idx, trip_idx }, segment)
                    }
                    StepKind::Walk => (LegKind::Walk, vec![step.from, step.to]),
                };
                Leg {
                    kind,
                    from_stop: step.from,
                    to_stop: step.to,
                    start: step.depart,
                    end: step.arrive,
                    stops,
                }
            })
            .collect();

        let departure = legs.first().map(|leg| leg.start).unwrap_or_default();
        let arrival = legs.last().map(|leg| leg.end).unwrap_or_default();
        Self {
            legs,
            departure,
            arrival,
        }
    }
}
