//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::GeneratedContent;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Generate {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        topic: Option<String>,
    },
    Concepts {
        text: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Generated {
        content: GeneratedContent,
    },
    Concepts {
        concepts: Vec<String>,
        labels: Vec<String>,
        count: usize,
    },
    Warning {
        message: String,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

/// Either pasted text or a topic; text wins when both are non-blank.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Deserialize)]
pub struct ConceptsIn {
    pub text: String,
}
#[derive(Debug, Serialize)]
pub struct ConceptsOut {
    pub concepts: Vec<String>,
    pub labels: Vec<String>,
    pub count: usize,
}

#[derive(Deserialize)]
pub struct TopicIn {
    pub topic: String,
}
#[derive(Serialize)]
pub struct TopicTextOut {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WarningOut {
    pub warning: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
