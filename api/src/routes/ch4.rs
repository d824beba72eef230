//! CH4 monthly measurement endpoints.

use crate::error::ApiError;
use crate::request_id::RequestId;
use crate::routes::measurements::{serve, RawParams};
use crate::state::AppState;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Router};
use shared::query::{CH4_MONTHLY, CH4_MONTHLY_TREND};

/// Creates the CH4 routes with application state.
pub fn ch4_routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/ch4", get(monthly))
        .route("/v1/ch4/monthly", get(monthly))
        .route("/v1/ch4/monthly/trend", get(monthly_trend))
        .with_state(state)
}

/// Monthly CH4 measurements, thresholds applied to the monthly average.
async fn monthly(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    raw: RawParams,
) -> Result<Response, ApiError> {
    serve(&CH4_MONTHLY, &state, request_id, raw).await
}

/// Monthly CH4 measurements, thresholds applied to the long-term trend.
async fn monthly_trend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    raw: RawParams,
) -> Result<Response, ApiError> {
    serve(&CH4_MONTHLY_TREND, &state, request_id, raw).await
}
