use crate::{
    dto::JourneyDto,
    error::{ApiError, ApiResult},
    params::parse_route_query,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::time::timeout;
use wayfare::{raptor::Raptor, resolver::nearby_stops};

/// Deadline for the store round-trips a routing request performs. The
/// search itself is bounded and runs to completion synchronously.
const STORE_DEADLINE: Duration = Duration::from_secs(60);

pub async fn plan_route(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<JourneyDto>> {
    let plan = parse_route_query(&params)?;
    let box_deg = state.config.nearby_box_degrees;

    let sources = timeout(
        STORE_DEADLINE,
        nearby_stops(&state.store, &state.graph, plan.from, box_deg),
    )
    .await
    .map_err(|_| ApiError::Timeout)??;
    let destinations = timeout(
        STORE_DEADLINE,
        nearby_stops(&state.store, &state.graph, plan.to, box_deg),
    )
    .await
    .map_err(|_| ApiError::Timeout)??;

    if sources.is_empty() || destinations.is_empty() {
        return Err(ApiError::NoNearbyStops);
    }
    let targets: Vec<u32> = destinations.into_iter().map(|(stop, _)| stop).collect();

    // First service day that yields a journey wins; only the weekend alias
    // ever tries more than one.
    let journey = plan.day.services().iter().find_map(|service| {
        Raptor::new(&state.graph, sources.clone(), targets.clone())
            .departure_at(plan.departure)
            .on_service(*service)
            .solve()
    });

    let journey = journey.ok_or(ApiError::NoRouteFound)?;
    Ok(Json(JourneyDto::from(&journey, &state.graph)))
}
