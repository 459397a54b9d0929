use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::info;
use uuid::Uuid;

use crate::domain::fortune::{DailyFortune, Notice};

/// Identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

struct Session {
    current: Option<Arc<DailyFortune>>,
    notices: Vec<Notice>,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            current: None,
            notices: Vec::new(),
            last_seen: now,
        }
    }
}

/// In-memory per-browser state: the latest fortune and pending notices.
///
/// The lock is only held for short synchronous swaps, never across an await.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The session's current fortune, if a refresh has succeeded.
    pub fn current(&self, id: SessionId) -> Option<Arc<DailyFortune>> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(&id)?;
        session.last_seen = Instant::now();
        session.current.clone()
    }

    /// Store the outcome of a refresh cycle. `fortune` replaces the previous
    /// record when present; a failed cycle passes `None` and keeps it.
    pub fn record_refresh(
        &self,
        id: SessionId,
        fortune: Option<Arc<DailyFortune>>,
        notices: Vec<Notice>,
    ) -> Option<Arc<DailyFortune>> {
        let now = Instant::now();
        let mut sessions = self.lock();
        let session = sessions.entry(id).or_insert_with(|| Session::new(now));
        session.last_seen = now;
        if fortune.is_some() {
            session.current = fortune;
        }
        session.notices = notices;
        session.current.clone()
    }

    /// Remove and return the notices waiting to be shown.
    pub fn take_notices(&self, id: SessionId) -> Vec<Notice> {
        self.lock()
            .get_mut(&id)
            .map(|s| std::mem::take(&mut s.notices))
            .unwrap_or_default()
    }

    /// Drop sessions not seen within `max_idle`. Returns how many were removed.
    pub fn delete_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_seen) <= max_idle);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Periodically evicts idle sessions. Runs as a long-lived background task.
pub async fn session_cleanup_task(store: Arc<SessionStore>, max_idle: Duration, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let count = store.delete_idle(max_idle);
        if count > 0 {
            info!(count, remaining = store.len(), "evicted idle sessions");
        }
    }
}
