//! wayfare is an earliest-arrival journey planner for metropolitan transit
//! networks (bus, busway, tram, suburban train).
//!
//! The [`loader`] builds an immutable [`graph::TransitGraph`] from a PostGIS
//! store once at startup; [`raptor::Raptor`] answers routing queries over it
//! in a bounded number of rounds, and [`journey::Journey`] is the leg chain
//! a query hands back. The [`store`] module owns every database query, and
//! [`resolver`] turns rider coordinates into candidate boarding stops.

pub mod graph;
pub mod journey;
pub mod loader;
pub mod raptor;
pub mod resolver;
pub mod shared;
pub mod store;

pub mod prelude {
    pub use crate::graph::{GraphConfig, ServiceDay, TransitGraph};
    pub use crate::journey::{Journey, Leg, LegKind};
    pub use crate::loader::load_graph;
    pub use crate::raptor::{MAX_ROUNDS, Raptor, SearchState};
    pub use crate::resolver::nearby_stops;
    pub use crate::shared::geo::Coordinate;
    pub use crate::shared::time::{Duration, Time};
    pub use crate::store::{StoreError, StoreGateway};
}
