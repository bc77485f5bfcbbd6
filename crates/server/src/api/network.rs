use crate::{
    dto::{LineDetailDto, LineDto, StopDetailDto, StopDto},
    error::{ApiError, ApiResult},
    params::required_float,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::{collections::HashMap, sync::Arc};

pub async fn list_lines(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<LineDto>>> {
    let lines = state.store.list_lines().await?;
    Ok(Json(lines.into_iter().map(LineDto::from).collect()))
}

pub async fn line_detail(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LineDetailDto>> {
    let line = state.store.line_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let stops = state.store.stops_on_line(id, 0).await?;
    Ok(Json(LineDetailDto {
        line: line.into(),
        stops: stops.into_iter().map(StopDto::from).collect(),
    }))
}

/// Viewport query; the store caps the result at 200 stops.
pub async fn stops_in_box(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StopDto>>> {
    let min_lat = required_float(&params, "min_lat")?;
    let min_lon = required_float(&params, "min_lon")?;
    let max_lat = required_float(&params, "max_lat")?;
    let max_lon = required_float(&params, "max_lon")?;

    let stops = state
        .store
        .stops_in_box(min_lat, min_lon, max_lat, max_lon)
        .await?;
    Ok(Json(stops.into_iter().map(StopDto::from).collect()))
}

pub async fn stop_detail(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StopDetailDto>> {
    let stop = state.store.stop_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let lines = state.store.lines_serving_stop(id).await?;
    Ok(Json(StopDetailDto {
        stop: stop.into(),
        lines: lines.into_iter().map(LineDto::from).collect(),
    }))
}
