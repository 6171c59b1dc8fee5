//! API server configuration.

use std::time::Duration;

use forno_core::conversation::MAX_TURNS;
use forno_core::session::DEFAULT_SESSION_TTL;

/// Configuration for the API server.
///
/// Built by the server binary from CLI flags and their environment
/// variables (`BIND_ADDR`, `MAX_HISTORY_TURNS`, `SESSION_TTL_SECS`,
/// `SECURE_COOKIES`).
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5000").
    pub bind_addr: String,
    /// Turns kept in history before each gateway call.
    pub max_history_turns: usize,
    /// Idle time after which a session is forgotten.
    pub session_ttl: Duration,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure_cookies: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".into(),
            max_history_turns: MAX_TURNS,
            session_ttl: DEFAULT_SESSION_TTL,
            secure_cookies: false,
        }
    }
}
