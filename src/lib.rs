//! chat-relay: single-endpoint HTTP relay for OpenAI chat completions
//!
//! Sits between a browser client and the OpenAI API so the API key never
//! leaves the server:
//! - `POST /chat` accepts `{ "messages": [...] }` and forwards them upstream
//! - Responses are collapsed to `{ "reply": "..." }` or `{ "error": "..." }`
//! - All upstream failures map to fixed, generic client-facing messages

pub mod api;
pub mod config;
pub mod relay;

pub use config::AppConfig;
pub use relay::run_server;
