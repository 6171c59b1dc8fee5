//! Session storage — one [`ConversationState`] per browser session.
//!
//! The browser holds only an opaque [`SessionId`]; the state lives in a
//! [`SessionStore`]. Writes are last-write-wins, there is no per-session lock.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::conversation::ConversationState;

/// Default idle time after which a session is forgotten.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// How often the cleanup task sweeps expired sessions.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Opaque identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Persistence for conversation state, keyed by session.
pub trait SessionStore: Send + Sync {
    /// Current state for `id`, or `None` if unknown or expired. A hit counts
    /// as activity and restarts the idle timer.
    fn load(&self, id: &SessionId) -> Option<ConversationState>;

    /// Store `state` for `id`, replacing whatever was there.
    fn save(&self, id: &SessionId, state: ConversationState);
}

#[derive(Debug, Clone)]
struct SessionEntry {
    state: ConversationState,
    touched_at: Instant,
}

/// In-memory session store with idle expiry.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Number of stored sessions, expired ones included until the next sweep.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Evict expired entries.
    pub fn cleanup(&self) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| entry.touched_at.elapsed() <= self.ttl);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!(evicted, "expired sessions evicted");
        }
    }

    /// Spawn a periodic cleanup task.
    pub fn spawn_cleanup_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                store.cleanup();
            }
        })
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &SessionId) -> Option<ConversationState> {
        let mut entry = self.sessions.get_mut(id)?;
        if entry.touched_at.elapsed() > self.ttl {
            return None;
        }
        entry.touched_at = Instant::now();
        Some(entry.state.clone())
    }

    fn save(&self, id: &SessionId, state: ConversationState) {
        self.sessions.insert(
            *id,
            SessionEntry {
                state,
                touched_at: Instant::now(),
            },
        );
    }
}
