//! Request and response bodies of the chat endpoints.

use serde::{Deserialize, Serialize};

/// `POST /enviar_mensagem` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageRequest {
    /// Missing or `null` reads as an empty message.
    #[serde(default)]
    pub mensagem: Option<String>,
}

/// Outcome marker shared by every JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Sucesso,
    Erro,
}

/// `POST /enviar_mensagem` response, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub resposta: String,
    pub status: Status,
}

impl ChatResponse {
    pub fn success(resposta: impl Into<String>) -> Self {
        Self {
            resposta: resposta.into(),
            status: Status::Sucesso,
        }
    }

    pub fn error(resposta: impl Into<String>) -> Self {
        Self {
            resposta: resposta.into(),
            status: Status::Erro,
        }
    }
}

/// `POST /limpar_historico` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub status: Status,
    pub mensagem: String,
}
