//! Request/response handler for the chat relay

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::error::RelayError;
use super::server::RelayState;
use crate::api::{ChatReply, ChatRequest, CompletionRequest, CompletionResponse, NO_REPLY_FALLBACK};

/// Maximum accepted request body size (1 MiB)
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Chat relay handler
///
/// One instance per request; the linear pipeline is: method check, credential
/// check, body validation, one upstream call, response mapping. Every path
/// terminates in exactly one HTTP response and no failure propagates past
/// [`ChatHandler::handle`].
pub struct ChatHandler {
    state: RelayState,
}

impl ChatHandler {
    pub fn new(state: RelayState) -> Self {
        Self { state }
    }

    /// Handle an incoming request
    pub async fn handle(&self, req: Request<Body>) -> Response {
        match self.relay(req).await {
            Ok(reply) => (StatusCode::OK, Json(ChatReply { reply })).into_response(),
            Err(e) => e.into_response(),
        }
    }

    async fn relay(&self, req: Request<Body>) -> Result<String, RelayError> {
        if req.method() != Method::POST {
            return Err(RelayError::MethodNotAllowed);
        }

        // Credential presence is checked before the body is looked at, so a
        // mis-configured deployment always reports the configuration error
        // even for malformed requests.
        let api_key = self
            .state
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(RelayError::MissingCredential)?;

        let body_bytes = to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|_| RelayError::InvalidBody)?;

        let chat: ChatRequest = serde_json::from_slice(&body_bytes).map_err(|e| {
            tracing::debug!(error = %e, "Failed to parse request body");
            RelayError::InvalidBody
        })?;

        tracing::debug!(message_count = chat.messages.len(), "Relaying chat request");

        let upstream = &self.state.config.upstream;
        let payload = CompletionRequest {
            model: upstream.model.clone(),
            messages: chat.messages,
            max_tokens: upstream.max_tokens,
            temperature: upstream.temperature,
        };

        let response = self
            .state
            .http_client
            .post(upstream.chat_completions_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Read the error body for the server log only; the client gets a
            // fixed generic message.
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error_body = %error_body,
                "Upstream returned error response"
            );
            return Err(RelayError::UpstreamRejected { status });
        }

        let completion: CompletionResponse = response.json().await?;

        Ok(completion
            .first_content()
            .unwrap_or(NO_REPLY_FALLBACK)
            .to_string())
    }
}
