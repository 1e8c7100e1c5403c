//! Relay failure taxonomy and its mapping to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ErrorReply;

/// Everything that can go wrong while relaying one chat request.
///
/// Each variant maps to exactly one status code and one fixed client-facing
/// message. Upstream error bodies and transport error details are logged
/// server-side only and never appear in a response.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("upstream API key not configured")]
    MissingCredential,

    #[error("invalid request body")]
    InvalidBody,

    #[error("upstream rejected request with status {status}")]
    UpstreamRejected { status: StatusCode },

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    /// HTTP status code for the client response
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::InvalidBody => StatusCode::BAD_REQUEST,
            RelayError::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed client-facing message, independent of the underlying detail
    pub fn client_message(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "Method not allowed",
            RelayError::MissingCredential => {
                "OpenAI API key not configured. \
                 Set OPENAI_API_KEY in Netlify environment variables."
            }
            RelayError::InvalidBody => "Invalid request body",
            RelayError::UpstreamRejected { .. } => "Failed to get response from AI service",
            RelayError::Upstream(_) => "Internal server error",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::Upstream(e) => {
                tracing::error!(error = %e, "Relay failed with upstream error");
            }
            RelayError::UpstreamRejected { status } => {
                tracing::warn!(status = %status, "Relay failed, upstream rejected request");
            }
            other => {
                tracing::debug!(error = %other, "Relay rejected request");
            }
        }

        (
            self.status(),
            Json(ErrorReply {
                error: self.client_message().to_string(),
            }),
        )
            .into_response()
    }
}
