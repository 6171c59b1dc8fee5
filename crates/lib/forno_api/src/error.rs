//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use forno_core::conversation::ConversationError;
use forno_core::gateway::GatewayError;
use thiserror::Error;

use crate::models::ChatResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Mensagem vazia")]
    EmptyMessage,

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    #[error("Falha na IA: {0}")]
    Gateway(#[from] GatewayError),
}

impl AppError {
    /// Text shown to the customer in the chat widget.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyMessage | AppError::BadRequest(_) => self.to_string(),
            AppError::Gateway(GatewayError::MalformedResponse) => {
                "Erro ao processar resposta da IA.".into()
            }
            AppError::Gateway(e) => {
                let cause = match e {
                    GatewayError::Timeout => {
                        "a IA demorou demais para responder. Tente novamente.".to_string()
                    }
                    GatewayError::Transport(m) => format!("não foi possível contatar a IA ({m})"),
                    GatewayError::MissingCredential => {
                        "chave da API (GEMINI_API_KEY) não configurada.".to_string()
                    }
                    _ => e
                        .remote_message()
                        .unwrap_or_else(|| "Erro desconhecido na API".to_string()),
                };
                format!("Ops! Tive um problema: {cause}")
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyMessage | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ChatResponse::error(self.user_message()));
        (self.status_code(), body).into_response()
    }
}

impl From<ConversationError> for AppError {
    fn from(e: ConversationError) -> Self {
        match e {
            ConversationError::InvalidInput => AppError::EmptyMessage,
        }
    }
}
