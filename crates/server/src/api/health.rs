use crate::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db = if state.store.ping().await {
        "connected"
    } else {
        "disconnected"
    };
    Json(json!({ "status": "ok", "db": db }))
}
