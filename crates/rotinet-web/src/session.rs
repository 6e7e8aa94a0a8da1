//! Per-browser view state, keyed by the `rotinet_session` cookie.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderName;
use axum_extra::headers::{Cookie, HeaderMapExt};
use rotinet_graph::ViewState;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::state::SharedState;

pub const SESSION_COOKIE: &str = "rotinet_session";

#[derive(Debug)]
struct SessionEntry {
    state: Arc<Mutex<ViewState>>,
    last_seen: Instant,
}

/// Live sessions, bounded by an idle `ttl` and a `max_sessions` cap.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Live session for `id`, or a fresh one under a newly minted id. Ids the
    /// store never issued, or that have expired, are not adopted. The bool is
    /// true when the session was created by this call.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, Arc<Mutex<ViewState>>, bool) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                if now.duration_since(entry.last_seen) < self.ttl {
                    entry.last_seen = now;
                    return (id, entry.state.clone(), false);
                }
            }
        }

        self.evict(&mut sessions, now);
        let id = Uuid::new_v4();
        let state = Arc::new(Mutex::new(ViewState::new()));
        sessions.insert(id, SessionEntry { state: state.clone(), last_seen: now });
        debug!(session = %id, total = sessions.len(), "new session");
        (id, state, true)
    }

    /// Drop expired sessions, then the least recently seen until there is
    /// room for one more.
    fn evict(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
        }

        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), remaining = sessions.len(), "evicted sessions");
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Extractor for the caller's session.
pub struct Session {
    pub id: Uuid,
    pub state: Arc<Mutex<ViewState>>,
    is_new: bool,
}

impl Session {
    /// `Set-Cookie` for sessions created by this request.
    pub fn set_cookie(&self) -> Option<(HeaderName, String)> {
        self.is_new.then(|| {
            (
                SET_COOKIE,
                format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id),
            )
        })
    }
}

impl FromRequestParts<SharedState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(SESSION_COOKIE).and_then(|v| Uuid::parse_str(v).ok()));
        let (id, state, is_new) = state.sessions.get_or_create(id).await;
        Ok(Self { id, state, is_new })
    }
}
