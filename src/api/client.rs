//! Client-facing request/response shapes

use serde::{Deserialize, Serialize};

/// Inbound chat request body.
///
/// `messages` is the only field the relay looks at. Elements are opaque and
/// forwarded to the upstream API unmodified; deserializing into
/// `Vec<serde_json::Value>` rejects anything that is not a JSON array while
/// leaving element content untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<serde_json::Value>,
}

/// Successful response body: `{ "reply": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Failure response body: `{ "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}
