//! Resolves a rider coordinate to the stops a journey may start or end at.

use crate::{
    graph::TransitGraph,
    shared::{geo::Coordinate, time::Duration},
    store::{StoreError, StoreGateway},
};

/// Walking cost charged for reaching the first stop. Kept at zero for now;
/// this is the join point for a real walk-to-stop estimate later.
pub const INITIAL_WALK: Duration = Duration::from_seconds(0);

/// Graph stops inside a box around `coordinate`, each with its initial walk.
///
/// An empty result means the coordinate has no usable stop nearby; the
/// boundary turns that into its not-found answer.
pub async fn nearby_stops(
    store: &StoreGateway,
    graph: &TransitGraph,
    coordinate: Coordinate,
    box_half_width_deg: f64,
) -> Result<Vec<(u32, Duration)>, StoreError> {
    let rows = store
        .stops_in_box(
            coordinate.latitude - box_half_width_deg,
            coordinate.longitude - box_half_width_deg,
            coordinate.latitude + box_half_width_deg,
            coordinate.longitude + box_half_width_deg,
        )
        .await?;

    Ok(rows
        .iter()
        .filter_map(|row| graph.stop_by_store_id(row.id))
        .map(|stop| (stop.index, INITIAL_WALK))
        .collect())
}
