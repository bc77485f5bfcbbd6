use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use wayfare::store::StoreError;

/// Everything a request handler can fail with, mapped onto the wire
/// contract in one place. The core never shapes user-visible errors; it
/// hands back typed values and this is where they become HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("No nearby stops found")]
    NoNearbyStops,

    #[error("No route found")]
    NoRouteFound,

    #[error("not found")]
    NotFound,

    #[error("request deadline exceeded")]
    Timeout,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NoNearbyStops => {
                (StatusCode::NOT_FOUND, "No nearby stops found").into_response()
            }
            ApiError::NoRouteFound => (StatusCode::NOT_FOUND, "No route found").into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT.into_response(),
            ApiError::Store(err) => {
                error!("store failure: {err}");
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
