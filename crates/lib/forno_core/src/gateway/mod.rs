//! Model gateway — the remote generative-text service behind a narrow trait.
//!
//! # Providers
//!
//! - [`gemini::GeminiGateway`] — Google Generative Language API
//!   (`models/{model}:generateContent`)
//!
//! Calls are single-attempt. A retry policy, if ever needed, wraps a
//! [`ModelGateway`] rather than living in the conversation logic.

pub mod config;
pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::conversation::{ConversationState, Turn};

/// Errors that can occur while asking the gateway for a reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("gateway request timed out")]
    Timeout,

    #[error("gateway transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status; carries the raw response body.
    #[error("gateway returned an error: {0}")]
    Remote(String),

    #[error("gateway response is missing the expected fields")]
    MalformedResponse,

    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,
}

impl GatewayError {
    /// Human-readable cause reported by the remote service.
    ///
    /// For [`GatewayError::Remote`] this is `error.message` from the JSON body
    /// when present, the raw body otherwise. Empty bodies yield `None`.
    pub fn remote_message(&self) -> Option<String> {
        let GatewayError::Remote(body) = self else {
            return None;
        };
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_owned));
        match from_json {
            Some(message) if !message.trim().is_empty() => Some(message),
            _ if !body.trim().is_empty() => Some(body.clone()),
            _ => None,
        }
    }
}

/// A service that produces the model's next turn for a conversation.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send the whole state (instruction, turns, generation config) and
    /// return the model's reply.
    async fn request_completion(&self, state: &ConversationState) -> Result<Turn, GatewayError>;
}
