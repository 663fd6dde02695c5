//! Topic analysis routes: run a search, read back the latest result.

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use pulse_core::{with_phases, DashboardView, PulseError};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PulseRequest {
    #[serde(default)]
    pub topic: String,
}

pub(super) async fn run_pulse(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PulseRequest>,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    let phase_req_id = req_id.0.clone();
    let search = state.session.search(Arc::clone(&state.model), &body.topic);
    let result = with_phases(
        state.phase_interval,
        move |phase| tracing::debug!(request_id = %phase_req_id, phase, "search phase"),
        search,
    )
    .await
    .map_err(|e| map_pulse_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: DashboardView::from_result(&result),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn latest_pulse(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    let Some(result) = state.session.latest().await else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "no analysis has completed yet",
        ));
    };

    Ok(Json(ApiResponse {
        data: DashboardView::from_result(&result),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Maps a search failure onto the error envelope. The message is always the
/// user-facing one; diagnostics were already logged by the core pipeline.
pub(super) fn map_pulse_error(request_id: String, error: &PulseError) -> ApiError {
    let code = match error {
        PulseError::EmptyTopic => "validation_error",
        PulseError::Upstream(_) => "upstream_unavailable",
        PulseError::Normalization(_) => "invalid_model_output",
        PulseError::Superseded => "superseded",
    };
    tracing::warn!(request_id = %request_id, code, error = %error, "pulse search failed");
    ApiError::new(request_id, code, error.user_message())
}
