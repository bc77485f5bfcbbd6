use crate::shared::{
    geo::Coordinate,
    time::{Duration, Time},
};
use std::sync::Arc;

/// A physical point where passengers board or alight.
#[derive(Debug, Clone)]
pub struct Stop {
    /// Dense internal index used for O(1) array lookups.
    pub index: u32,
    /// Stable identifier in the persistent store.
    pub id: i64,
    /// Short rider-facing code.
    pub code: Arc<str>,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

/// Vehicle category of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitMode {
    #[default]
    Bus,
    Busway,
    Tram,
    Train,
}

impl TransitMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "bus" => Some(Self::Bus),
            "busway" => Some(Self::Busway),
            "tram" => Some(Self::Tram),
            "train" => Some(Self::Train),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Busway => "busway",
            Self::Tram => "tram",
            Self::Train => "train",
        }
    }

    /// Fare class charged on this mode. Carried on routes for clients;
    /// the search itself never reads it.
    pub const fn fare_class(&self) -> u8 {
        match self {
            Self::Busway | Self::Tram => 2,
            Self::Bus | Self::Train => 1,
        }
    }
}

/// Calendar category a trip runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceDay {
    Weekday,
    Saturday,
    Sunday,
}

impl ServiceDay {
    pub const ALL: [ServiceDay; 3] = [Self::Weekday, Self::Saturday, Self::Sunday];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "weekday" => Some(Self::Weekday),
            "saturday" => Some(Self::Saturday),
            "sunday" => Some(Self::Sunday),
            _ => None,
        }
    }
}

/// One unique ordered stop sequence of a line in one direction. Every trip
/// of the route calls at exactly these stops in exactly this order.
#[derive(Debug, Clone)]
pub struct Route {
    pub index: u32,
    pub line_id: i64,
    pub direction: u8,
    /// Rider-facing line code, e.g. "T1" or "L204".
    pub code: Arc<str>,
    pub mode: TransitMode,
    /// Display color as the store carries it.
    pub color: Arc<str>,
    pub fare_class: u8,
    /// Stop indices in riding order. Length >= 2, no stop twice.
    pub stops: Box<[u32]>,
}

/// A contiguous range within the flat stop-times array.
#[derive(Debug, Default, Clone, Copy)]
pub struct Slice {
    pub start_idx: u32,
    pub count: u32,
}

/// Arrival and departure of one trip at one stop along its route.
#[derive(Debug, Clone, Copy)]
pub struct StopTime {
    pub arrival: Time,
    pub departure: Time,
}

/// One scheduled run of a route.
#[derive(Debug, Clone, Copy)]
pub struct Trip {
    pub index: u32,
    pub route_idx: u32,
    pub service: ServiceDay,
    /// Departure at the first stop of the route; trips within a route are
    /// kept sorted on this.
    pub first_departure: Time,
    /// Range of this trip's stop times, one entry per route stop.
    pub times: Slice,
}

/// A directed foot connection between two nearby stops.
#[derive(Debug, Clone, Copy)]
pub struct Transfer {
    pub from_stop: u32,
    pub to_stop: u32,
    pub duration: Duration,
}

/// A route serving a stop, with the stop's position along that route.
#[derive(Debug, Clone, Copy)]
pub struct RouteAtStop {
    pub route_idx: u32,
    pub position: u32,
}
