//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "quizgen_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "quizgen_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply = handle_text_frame(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(reply)).await {
          error!(target: "quizgen_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "quizgen_backend", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
pub(crate) async fn handle_text_frame(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "quizgen_backend", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Generate { text, topic } => {
      match generate_content(state, text.as_deref(), topic.as_deref()).await {
        Ok(content) => {
          info!(target: "quizgen_backend", id = %content.id, "WS generate served");
          ServerWsMessage::Generated { content }
        }
        Err(e) => ServerWsMessage::Warning { message: e.to_string() },
      }
    }

    ClientWsMessage::Concepts { text } => {
      let out = analyze_concepts(&text);
      ServerWsMessage::Concepts { concepts: out.concepts, labels: out.labels, count: out.count }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::GeneratorConfig;
  use serde_json::Value;

  fn state() -> AppState {
    AppState::from_config(GeneratorConfig { seed: Some(1), ..GeneratorConfig::default() })
  }

  async fn reply(txt: &str) -> Value {
    serde_json::from_str(&handle_text_frame(txt, &state()).await).expect("reply is json")
  }

  #[tokio::test]
  async fn ping_pongs() {
    assert_eq!(reply(r#"{"type":"ping"}"#).await["type"], "pong");
  }

  #[tokio::test]
  async fn generate_from_topic() {
    let v = reply(r#"{"type":"generate","topic":"Gravity"}"#).await;
    assert_eq!(v["type"], "generated");
    assert_eq!(v["content"]["source"], "topic");
    assert_eq!(v["content"]["quizQuestions"].as_array().map(Vec::len), Some(3));
    assert_eq!(v["content"]["concepts"][0], "gravity");
  }

  #[tokio::test]
  async fn blank_generate_is_a_warning() {
    let v = reply(r#"{"type":"generate","text":"   "}"#).await;
    assert_eq!(v["type"], "warning");
  }

  #[tokio::test]
  async fn concepts_message() {
    let v = reply(r#"{"type":"concepts","text":"Gravity pulls. Gravity holds."}"#).await;
    assert_eq!(v["type"], "concepts");
    assert_eq!(v["labels"][0], "Gravity");
    assert_eq!(v["count"], 1);
  }

  #[tokio::test]
  async fn invalid_json_is_an_error() {
    let v = reply("not json").await;
    assert_eq!(v["type"], "error");
  }
}
