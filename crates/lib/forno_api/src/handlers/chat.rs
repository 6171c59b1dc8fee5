//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::CookieJar;
use forno_core::chat;
use tracing::warn;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ChatResponse, SendMessageRequest};
use crate::services::session::{self, ActiveSession};

/// `POST /enviar_mensagem` — forward a customer message to the model.
///
/// The session is persisted even when the gateway fails, so the customer's
/// message stays in history for the next attempt.
pub async fn send_message_handler(
    State(app): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> (CookieJar, AppResult<Json<ChatResponse>>) {
    let (jar, session) = session::resolve(&app, jar);
    (jar, exchange(&app, session, body).await)
}

async fn exchange(
    app: &AppState,
    session: ActiveSession,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let text = request.mensagem.unwrap_or_default();

    let exchange = chat::send_message(
        app.gateway.as_ref(),
        &session.state,
        &text,
        app.config.max_history_turns,
    )
    .await?;

    app.sessions.save(&session.id, exchange.state);

    let turn = exchange.reply.inspect_err(|e| {
        warn!(session = %session.id, error = %e, "model gateway call failed");
    })?;

    Ok(Json(ChatResponse::success(turn.text)))
}
