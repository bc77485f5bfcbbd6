//! Startup load of the transit graph from the store.

use crate::{
    graph::{GraphBuilder, GraphConfig, ServiceDay, TransitGraph},
    store::{StoreError, StoreGateway},
};
use std::time::Instant;
use tracing::{debug, info};

/// Builds the immutable [`TransitGraph`] from a full store dump.
///
/// Runs once at startup. A store failure anywhere in the sequence aborts
/// the load (the caller is expected to treat that as fatal); individual
/// unusable patterns are skipped by the builder and only logged.
pub async fn load_graph(
    store: &StoreGateway,
    config: &GraphConfig,
) -> Result<TransitGraph, StoreError> {
    let started = Instant::now();
    let mut builder = GraphBuilder::new(*config);

    builder.add_stops(store.list_stops().await?);

    let patterns = store.pattern_list().await?;
    debug!(patterns = patterns.len(), "loading patterns");
    for pattern in patterns {
        let meta = store.line_meta(pattern.line_id).await?;
        let stop_ids = store
            .stops_of_pattern(pattern.line_id, pattern.direction)
            .await?;
        let Some(route_idx) =
            builder.add_pattern(pattern.line_id, pattern.direction, meta, &stop_ids)
        else {
            continue;
        };

        let first_stop = builder.first_stop_store_id(route_idx);
        for service in ServiceDay::ALL {
            let departures = store
                .schedules_for_first_stop(pattern.line_id, pattern.direction, first_stop, service)
                .await?;
            builder.add_trips(route_idx, service, &departures);
        }
    }

    let pairs = store.proximity_pairs(config.transfer_radius_m).await?;
    builder.add_transfer_pairs(&pairs);

    let graph = builder.finish();
    info!(
        stops = graph.stop_count(),
        routes = graph.route_count(),
        trips = graph.trip_count(),
        transfers = graph.transfer_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "transit graph ready"
    );
    Ok(graph)
}
