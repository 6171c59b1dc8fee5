//! Clear-history handler.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use forno_core::conversation::reset_session;
use tracing::debug;

use crate::AppState;
use crate::models::{ClearHistoryResponse, Status};
use crate::services::session;

/// `POST /limpar_historico` — replace the session's conversation with a fresh one.
pub async fn clear_history_handler(
    State(app): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ClearHistoryResponse>) {
    let (jar, id) = session::resolve_id(&app, jar);
    app.sessions.save(&id, reset_session());
    debug!(session = %id, "history cleared");

    (
        jar,
        Json(ClearHistoryResponse {
            status: Status::Sucesso,
            mensagem: "Histórico limpo".into(),
        }),
    )
}
