use goduel_engine::Stone;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames a client may send over a match socket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ClientMessage {
    /// `{ "request": "B" | "W" }`
    Seat { request: Stone },
    /// `{ "requestState": <anything> }`. A seat token here re-binds the seat.
    State {
        #[serde(rename = "requestState")]
        request_state: Value,
    },
    /// `{ "token": "...", "content": "B 3 4" }`
    Move { token: String, content: String },
}

/// Frames the server sends. Field names are the wire names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Seat {
        player: Stone,
        token: String,
    },
    State {
        state: Vec<String>,
    },
    Content {
        content: String,
    },
    Result {
        result: String,
    },
    Rejected {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    /// Seat request after both seats are taken: serialized as `{}`.
    AlreadyStarted {},
}

impl ServerMessage {
    pub fn rejected(error: impl ToString, content: Option<String>) -> Self {
        ServerMessage::Rejected {
            error: error.to_string(),
            content,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!(self).to_string()
    }
}
