mod pulse;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use pulse_core::{ModelCollaborator, SearchSession, PHASES};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SearchSession>,
    pub model: Arc<dyn ModelCollaborator>,
    pub phase_interval: Duration,
    index_page: Arc<str>,
}

impl AppState {
    pub fn new(
        session: Arc<SearchSession>,
        model: Arc<dyn ModelCollaborator>,
        phase_interval: Duration,
    ) -> Self {
        let index_page = render_index(phase_interval).into();
        Self {
            session,
            model,
            phase_interval,
            index_page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "superseded" => StatusCode::CONFLICT,
            "upstream_unavailable" | "invalid_model_output" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Fills the dashboard page's phase messages and rotation interval.
fn render_index(phase_interval: Duration) -> String {
    let phases = serde_json::to_string(&PHASES).unwrap_or_else(|_| "[]".to_string());
    INDEX_TEMPLATE
        .replace("__PULSE_PHASES__", &phases)
        .replace(
            "__PULSE_PHASE_INTERVAL_MS__",
            &phase_interval.as_millis().to_string(),
        )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/v1/health", get(health))
        .route("/api/v1/pulse", post(pulse::run_pulse))
        .route("/api/v1/pulse/latest", get(pulse::latest_pulse))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_page.to_string())
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
