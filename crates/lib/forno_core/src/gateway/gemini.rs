//! Google Gemini gateway.
//!
//! Calls `POST {api_base}/v1beta/models/{model}:generateContent?key=…` once per
//! turn with the full conversation and returns the first candidate's text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::config::GeminiConfig;
use super::{GatewayError, ModelGateway};
use crate::conversation::{ConversationState, Role, Turn};

// Request wire types.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_state(state: &'a ConversationState) -> Self {
        let config = state.generation_config();
        Self {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: state.system_instruction(),
                }],
            },
            contents: state
                .turns()
                .iter()
                .map(|turn| Content {
                    role: Some(turn.role),
                    parts: [Part { text: &turn.text }],
                })
                .collect(),
            generation_config: WireGenerationConfig {
                max_output_tokens: config.max_output_tokens,
                temperature: config.temperature,
            },
        }
    }
}

// Response wire types. Every level is optional; any missing piece maps to
// `MalformedResponse`.

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Extract the model turn from a successful response body.
fn parse_reply(body: &str) -> Result<Turn, GatewayError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|_| GatewayError::MalformedResponse)?;

    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or(GatewayError::MalformedResponse)?;

    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        return Err(GatewayError::MalformedResponse);
    }
    Ok(Turn::model(text))
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        // The URL carries the API key; keep it out of messages.
        GatewayError::Transport(e.without_url().to_string())
    }
}

/// Gemini `generateContent` client.
pub struct GeminiGateway {
    config: GeminiConfig,
    http: Client,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Endpoint URL without the `key` query parameter.
    fn endpoint(&self) -> Result<Url, GatewayError> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        );
        Url::parse(&raw)
            .map_err(|e| GatewayError::Transport(format!("invalid gateway URL {raw}: {e}")))
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn request_completion(&self, state: &ConversationState) -> Result<Turn, GatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;
        let url = self.endpoint()?;

        debug!(model = %self.config.model, turns = state.turns().len(), "Gemini API request");

        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .timeout(self.config.timeout)
            .json(&GenerateContentRequest::from_state(state))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!(%status, "Gemini API returned an error");
            return Err(GatewayError::Remote(body));
        }

        parse_reply(&body).inspect_err(|_| warn!("Gemini API response has no candidate text"))
    }
}
