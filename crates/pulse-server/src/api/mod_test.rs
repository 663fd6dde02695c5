use axum::body::{to_bytes, Body};
use axum::http::Request;
use futures::future::BoxFuture;
use pulse_core::{GenerateRequest, ModelReply, RawCitation, UpstreamError};
use tower::ServiceExt;

use super::*;

const REMOTE_WORK: &str = r#"```json
{"topic":"Remote Work","summary":"Hybrid is winning.","sideA":{"name":"Pro-Remote","percentage":55,"emotion":"Hopeful","arguments":["No commute"]},"sideB":{"name":"Pro-Office","percentage":35,"emotion":"Skeptical","arguments":["Culture"]},"neutral":{"percentage":10,"summary":"Depends on the team."}}
```"#;

/// Answers every request the same way.
struct FixedModel {
    reply: Result<&'static str, &'static str>,
}

impl ModelCollaborator for FixedModel {
    fn generate<'a>(
        &'a self,
        _request: &'a GenerateRequest,
    ) -> BoxFuture<'a, Result<ModelReply, UpstreamError>> {
        Box::pin(async move {
            match self.reply {
                Ok(text) => Ok(ModelReply {
                    text: text.to_string(),
                    citations: vec![RawCitation {
                        title: None,
                        uri: Some("https://news.example/remote".to_string()),
                    }],
                }),
                Err(message) => Err(UpstreamError::new(message)),
            }
        })
    }
}

fn app_with(reply: Result<&'static str, &'static str>) -> (Router, Arc<SearchSession>) {
    let session = Arc::new(SearchSession::new());
    let state = AppState::new(
        Arc::clone(&session),
        Arc::new(FixedModel { reply }),
        Duration::from_millis(1500),
    );
    (build_app(state), session)
}

fn post_pulse(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/pulse")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_codes_map_to_statuses() {
    for (code, status) in [
        ("not_found", StatusCode::NOT_FOUND),
        ("superseded", StatusCode::CONFLICT),
        ("upstream_unavailable", StatusCode::BAD_GATEWAY),
        ("invalid_model_output", StatusCode::BAD_GATEWAY),
        ("something_else", StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let response = ApiError::new("req-1", code, "x").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[test]
fn index_page_has_phases_and_interval_filled_in() {
    let page = render_index(Duration::from_millis(250));
    assert!(!page.contains("__PULSE_PHASES__"));
    assert!(!page.contains("__PULSE_PHASE_INTERVAL_MS__"));
    assert!(page.contains("Initializing sensors..."));
    assert!(page.contains("250"));
}

#[tokio::test]
async fn health_returns_ok_with_request_id() {
    let (app, _) = app_with(Ok(REMOTE_WORK));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "health-1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("health-1")
    );
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["meta"]["request_id"], "health-1");
}

#[tokio::test]
async fn index_serves_dashboard_html() {
    let (app, _) = app_with(Ok(REMOTE_WORK));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {content_type}");
}

#[tokio::test]
async fn pulse_returns_dashboard_view() {
    let (app, session) = app_with(Ok(REMOTE_WORK));
    let response = app
        .oneshot(post_pulse(r#"{"topic":"Remote Work"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let data = &json["data"];
    assert_eq!(data["topic"], "Remote Work");
    assert_eq!(data["side_a"]["name"], "Pro-Remote");
    assert_eq!(data["chart"][1]["label"], "Neutral/Undecided");
    assert_eq!(data["chart"][2]["percentage"], 35);
    assert_eq!(data["dominant"], "side_a");
    assert_eq!(data["sources"][0]["title"], "Unknown Source");
    assert!(session.latest().await.is_some());
}

#[tokio::test]
async fn blank_topic_is_validation_error() {
    let (app, session) = app_with(Ok(REMOTE_WORK));
    let response = app
        .oneshot(post_pulse(r#"{"topic":"   "}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(session.latest().await.is_none());
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway_with_user_message() {
    let (app, _) = app_with(Err("connection reset by peer"));
    let response = app
        .oneshot(post_pulse(r#"{"topic":"Remote Work"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "upstream_unavailable");
    assert_eq!(
        json["error"]["message"],
        "Unable to connect to the social pulse network."
    );
}

#[tokio::test]
async fn unparseable_reply_is_invalid_model_output() {
    let (app, _) = app_with(Ok("Sorry, I cannot do that."));
    let response = app
        .oneshot(post_pulse(r#"{"topic":"Remote Work"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "invalid_model_output");
    assert_eq!(
        json["error"]["message"],
        "Failed to parse social analysis data."
    );
    let message = json["error"]["message"].as_str().unwrap_or_default();
    assert!(!message.contains("Sorry"), "raw reply leaked: {message}");
}

#[tokio::test]
async fn latest_is_not_found_before_any_search() {
    let (app, _) = app_with(Ok(REMOTE_WORK));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/pulse/latest")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn latest_returns_last_successful_search() {
    let (app, _) = app_with(Ok(REMOTE_WORK));
    let response = app
        .clone()
        .oneshot(post_pulse(r#"{"topic":"Remote Work"}"#))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/pulse/latest")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["summary"], "Hybrid is winning.");
}
