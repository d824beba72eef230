//! CO2 weekly measurement endpoints.

use crate::error::ApiError;
use crate::request_id::RequestId;
use crate::routes::measurements::{serve, RawParams};
use crate::state::AppState;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Router};
use shared::query::{CO2_WEEKLY, CO2_WEEKLY_INCREASE};

/// Creates the CO2 routes with application state.
///
/// `/v1` serves the weekly CO2 data directly so that the bare versioned
/// path returns something useful.
pub fn co2_routes(state: AppState) -> Router {
    Router::new()
        .route("/v1", get(weekly))
        .route("/v1/co2", get(weekly))
        .route("/v1/co2/weekly", get(weekly))
        .route("/v1/co2/weekly/increase", get(weekly_increase))
        .with_state(state)
}

/// Weekly CO2 measurements, thresholds applied to the weekly average.
async fn weekly(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    raw: RawParams,
) -> Result<Response, ApiError> {
    serve(&CO2_WEEKLY, &state, request_id, raw).await
}

/// Weekly CO2 measurements, thresholds applied to the increase since
/// pre-industrial levels.
async fn weekly_increase(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    raw: RawParams,
) -> Result<Response, ApiError> {
    serve(&CO2_WEEKLY_INCREASE, &state, request_id, raw).await
}
