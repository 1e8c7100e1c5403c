//! OpenAI chat-completion API type definitions

use serde::{Deserialize, Serialize};

/// Fallback reply when the upstream response carries no usable content
pub const NO_REPLY_FALLBACK: &str = "No response generated.";

/// Chat completion request sent upstream
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<serde_json::Value>,
    pub max_tokens: u32,
    // f64: an f32 0.7 widens to 0.699999988079071 on the wire
    pub temperature: f64,
}

/// Chat completion response from upstream.
///
/// Every level is optional: the relay only needs `choices[0].message.content`
/// and substitutes [`NO_REPLY_FALLBACK`] when any level is missing, so no
/// field here is allowed to fail deserialization just by being absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// Response choice
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response message
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if present at every level of the path
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_content_present() {
        let resp: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#)
                .unwrap();
        assert_eq!(resp.first_content(), Some("hi"));
    }

    #[test]
    fn test_first_content_empty_choices() {
        let resp: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn test_first_content_absent_choices() {
        let resp: CompletionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn test_first_content_missing_message() {
        let resp: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"finish_reason":"stop"}]}"#).unwrap();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn test_first_content_missing_content() {
        let resp: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn test_completion_response_ignores_extra_fields() {
        let raw = r#"{"id":"cmpl-1","object":"chat.completion","created":1,
                      "model":"gpt-4o-mini","usage":{"total_tokens":12},
                      "choices":[{"index":0,"message":{"role":"assistant","content":"ok"},
                      "finish_reason":"stop"}]}"#;
        let resp: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_content(), Some("ok"));
    }

    #[test]
    fn test_completion_request_wire_format() {
        let req = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![serde_json::json!({"role":"user","content":"hi"})],
            max_tokens: 300,
            temperature: 0.7,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["max_tokens"], 300);
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["messages"][0]["content"], "hi");
    }
}
