//! Cookie-keyed store of per-browser [`SessionState`] values.
//!
//! Transitions run under the store lock through [`SessionStore::update`], so
//! two requests on one session never overwrite each other. Each session is
//! independent; nothing is shared between them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::Mutex;
use uuid::Uuid;

use cerebra_core::session::SessionState;

pub const COOKIE_NAME: &str = "cerebra_session";

struct Entry {
    state: SessionState,
    touched: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<Mutex<HashMap<Uuid, Entry>>>,
    ttl: Duration,
    secure_cookies: bool,
}

impl SessionStore {
    pub fn new(ttl: Duration, secure_cookies: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            secure_cookies,
        }
    }

    /// Resolve the session id from the cookie, minting a new one (and the
    /// cookie that carries it) when absent or malformed.
    pub fn identify(&self, jar: CookieJar) -> (CookieJar, Uuid) {
        if let Some(id) = jar
            .get(COOKIE_NAME)
            .and_then(|c| Uuid::parse_str(c.value()).ok())
        {
            return (jar, id);
        }

        let id = Uuid::new_v4();
        let cookie = Cookie::build((COOKIE_NAME, id.to_string()))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax);
        tracing::debug!(session = %id, "session started");
        (jar.add(cookie), id)
    }

    /// Current state of session `id`; a fresh state for unknown or expired
    /// sessions. Reading a live session counts as activity.
    pub async fn snapshot(&self, id: Uuid) -> SessionState {
        let mut entries = self.entries.lock().await;
        self.evict_expired(&mut entries);
        match entries.get_mut(&id) {
            Some(entry) => {
                entry.touched = Instant::now();
                entry.state.clone()
            }
            None => SessionState::default(),
        }
    }

    /// Apply `transition` to the current state of session `id` while holding
    /// the lock, and store the state it returns. On error the stored state is
    /// left as it was.
    pub async fn update<T, E>(
        &self,
        id: Uuid,
        transition: impl FnOnce(&SessionState) -> Result<(SessionState, T), E>,
    ) -> Result<T, E> {
        let mut entries = self.entries.lock().await;
        self.evict_expired(&mut entries);

        let current = entries.get(&id).map(|entry| &entry.state);
        let (next, output) = match current {
            Some(state) => transition(state)?,
            None => transition(&SessionState::default())?,
        };
        entries.insert(
            id,
            Entry {
                state: next,
                touched: Instant::now(),
            },
        );
        Ok(output)
    }

    pub async fn len(&self) -> usize {
        let mut entries = self.entries.lock().await;
        self.evict_expired(&mut entries);
        entries.len()
    }

    fn evict_expired(&self, entries: &mut HashMap<Uuid, Entry>) {
        let before = entries.len();
        entries.retain(|_, entry| entry.touched.elapsed() < self.ttl);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, "expired sessions evicted");
        }
    }
}
