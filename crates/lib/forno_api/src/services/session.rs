//! Session service — maps the request cookie to a stored conversation.
//!
//! Handlers are the only place that load or store [`ConversationState`];
//! the conversation logic itself never sees the store.

use axum_extra::extract::CookieJar;
use forno_core::conversation::{ConversationState, create_initial_state};
use forno_core::session::SessionId;
use tracing::debug;

use crate::AppState;
use crate::services::cookies::{SESSION_COOKIE, session_cookie};

/// Session bound to the current request.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub id: SessionId,
    pub state: ConversationState,
}

/// Session id from the cookie, or a fresh one added to `jar`.
pub fn resolve_id(app: &AppState, jar: CookieJar) -> (CookieJar, SessionId) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<SessionId>().ok());

    match existing {
        Some(id) => (jar, id),
        None => {
            let id = SessionId::new();
            debug!(session = %id, "issuing session cookie");
            let jar = jar.add(session_cookie(&id, app.config.secure_cookies));
            (jar, id)
        }
    }
}

/// Session for this request, with a fresh (unsaved) state if none is stored.
pub fn resolve(app: &AppState, jar: CookieJar) -> (CookieJar, ActiveSession) {
    let (jar, id) = resolve_id(app, jar);
    let state = app.sessions.load(&id).unwrap_or_else(|| {
        debug!(session = %id, "starting conversation");
        create_initial_state()
    });
    (jar, ActiveSession { id, state })
}
