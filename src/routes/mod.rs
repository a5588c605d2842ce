//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static front end from `./static` with index fallback
/// - CORS (allow any origin/method/headers); adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/generate", post(http::http_post_generate))
        .route("/api/v1/concepts", post(http::http_post_concepts))
        .route("/api/v1/topic_text", post(http::http_post_topic_text))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::GeneratorConfig;

    fn app() -> Router {
        let cfg = GeneratorConfig { seed: Some(99), ..GeneratorConfig::default() };
        build_router(Arc::new(AppState::from_config(cfg)))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let res = app().oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn health_is_ok() {
        let req = Request::builder().uri("/api/v1/health").body(Body::empty()).expect("request");
        let res = app().oneshot(req).await.expect("response");
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn generate_from_text() {
        let text = "Photosynthesis is a process. Photosynthesis occurs in plants. Plants use Photosynthesis to create energy.";
        let (status, v) = post_json("/api/v1/generate", json!({ "text": text })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["source"], "text");
        assert_eq!(v["wordCount"], 14);
        assert_eq!(v["sentenceCount"], 3);
        assert_eq!(v["concepts"][0], "photosynthesis");

        let assignments = v["assignments"].as_array().expect("assignments");
        assert_eq!(assignments.len(), 2);
        assert!(assignments[0].as_str().unwrap_or_default().contains("Photosynthesis"));

        let questions = v["quizQuestions"].as_array().expect("questions");
        assert_eq!(questions.len(), 3);
        assert!(questions[0]["text"].as_str().unwrap_or_default().contains("Photosynthesis"));
        for q in questions {
            let options = q["options"].as_array().expect("options");
            assert_eq!(options.len(), 4);
            let label = q["correctLabel"].as_str().expect("label");
            assert!(["A", "B", "C", "D"].contains(&label));
        }
    }

    #[tokio::test]
    async fn generate_with_nothing_warns() {
        let (status, v) = post_json("/api/v1/generate", json!({ "text": "  ", "topic": "" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(v["warning"].as_str().unwrap_or_default().contains("Please provide"));
    }

    #[tokio::test]
    async fn concepts_endpoint() {
        let (status, v) = post_json("/api/v1/concepts", json!({ "text": "" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["count"], 0);
    }

    #[tokio::test]
    async fn topic_text_endpoint() {
        let (status, v) = post_json("/api/v1/topic_text", json!({ "topic": "Gravity" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["text"].as_str().unwrap_or_default().matches("Gravity").count(), 6);

        let (status, _) = post_json("/api/v1/topic_text", json!({ "topic": " " })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
