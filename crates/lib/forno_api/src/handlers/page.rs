//! Chat page and not-found fallback.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum_extra::extract::CookieJar;
use forno_core::conversation::reset_session;

use crate::AppState;
use crate::services::session;

const PAGE: &str = include_str!("../../assets/index.html");
const NOTICE_SLOT: &str = "<!-- notice -->";

const NOT_FOUND_NOTICE: &str = r#"<p class="notice">Página não encontrada</p>"#;

fn not_found_page() -> String {
    PAGE.replace(NOTICE_SLOT, NOT_FOUND_NOTICE)
}

/// `GET /` — serve the chat widget; a first visit starts a fresh conversation.
pub async fn index_handler(
    State(app): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (jar, id) = session::resolve_id(&app, jar);
    if app.sessions.load(&id).is_none() {
        app.sessions.save(&id, reset_session());
    }
    (jar, Html(PAGE.to_string()))
}

/// Fallback for unknown routes: the chat page with a 404 status.
pub async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(not_found_page()))
}
