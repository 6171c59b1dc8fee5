//! Cookie service — the httpOnly cookie carrying the session id.

use axum_extra::extract::cookie::{Cookie, SameSite};
use forno_core::session::SessionId;

/// Cookie name for the session id.
pub const SESSION_COOKIE: &str = "forno_session";

/// Build the session cookie. No `Max-Age`: it lives as long as the browser
/// session, the server-side TTL decides when the state is dropped.
pub fn session_cookie(id: &SessionId, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE.to_string(), id.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_http_only_and_site_wide() {
        let id = SessionId::new();
        let cookie = session_cookie(&id, false);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_none());
    }

    #[test]
    fn secure_flag_follows_config() {
        let cookie = session_cookie(&SessionId::new(), true);
        assert_eq!(cookie.secure(), Some(true));
    }
}
