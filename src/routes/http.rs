//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs basic result info (never the full text).

use std::sync::Arc;
use axum::{extract::State, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.as_deref().map(str::len).unwrap_or(0), has_topic = body.topic.is_some()))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> Result<Json<crate::domain::GeneratedContent>, GenerateError> {
  let content = generate_content(&state, body.text.as_deref(), body.topic.as_deref()).await?;
  info!(target: "quizgen_backend", id = %content.id, "HTTP generate served");
  Ok(Json(content))
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_concepts(Json(body): Json<ConceptsIn>) -> impl IntoResponse {
  let out = analyze_concepts(&body.text);
  info!(target: "quizgen_backend", count = out.count, "HTTP concepts served");
  Json(out)
}

#[instrument(level = "info", skip(state, body), fields(topic = %crate::util::trunc_for_log(&body.topic, 64)))]
pub async fn http_post_topic_text(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TopicIn>,
) -> Result<Json<TopicTextOut>, GenerateError> {
  if body.topic.trim().is_empty() {
    return Err(GenerateError::EmptyInput);
  }
  Ok(Json(TopicTextOut { text: expand_topic(&state.topic_template, &body.topic) }))
}
