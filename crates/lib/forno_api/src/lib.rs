//! # forno_api
//!
//! HTTP API library for Forno.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use forno_core::gateway::ModelGateway;
use forno_core::session::SessionStore;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, history, page};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Remote model used to produce replies.
    pub gateway: Arc<dyn ModelGateway>,
    /// Conversation state per browser session.
    pub sessions: Arc<dyn SessionStore>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_INDEX, get(page::index_handler))
        .route(routes::POST_ENVIAR_MENSAGEM, post(chat::send_message_handler))
        .route(routes::POST_LIMPAR_HISTORICO, post(history::clear_history_handler))
        .fallback(page::not_found_handler)
        .layer(cors)
        .with_state(state)
}
