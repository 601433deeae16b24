//! Process-wide registry of undo sessions.
//!
//! Sessions are opened into the registry, looked up by the `SessionId` it
//! hands out, and closed explicitly. The most recently opened live session
//! is the default target for callers that do not track ids.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use rewind_core::{RewindConfig, RewindError, RewindResult};
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info};

use crate::session::UndoSession;

/// Registry-assigned identity of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

pub type SharedSession = Arc<Mutex<UndoSession>>;

static GLOBAL: OnceLock<SessionRegistry> = OnceLock::new();

#[derive(Default)]
struct RegistryInner {
    sessions: HashMap<SessionId, SharedSession>,
    /// Open order, oldest first.
    order: Vec<SessionId>,
}

#[derive(Default)]
pub struct SessionRegistry {
    next_id: AtomicU64,
    inner: Mutex<RegistryInner>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static SessionRegistry {
        GLOBAL.get_or_init(SessionRegistry::new)
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install the engine on `conn` and register the resulting session.
    pub fn open(&self, conn: Connection, config: RewindConfig) -> RewindResult<SessionId> {
        let session = UndoSession::new(conn, config)?;
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);

        let mut inner = self.lock();
        inner.sessions.insert(id, Arc::new(Mutex::new(session)));
        inner.order.push(id);
        info!(session = %id, open = inner.order.len(), "undo session opened");
        Ok(id)
    }

    pub fn open_in_memory(&self) -> RewindResult<SessionId> {
        self.open(Connection::open_in_memory()?, RewindConfig::default())
    }

    pub fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.lock().sessions.get(&id).cloned()
    }

    /// The most recently opened session still registered.
    pub fn latest(&self) -> Option<(SessionId, SharedSession)> {
        let inner = self.lock();
        let id = *inner.order.last()?;
        inner.sessions.get(&id).map(|s| (id, Arc::clone(s)))
    }

    /// Remove a session. Its connection, and with it the log tables and
    /// triggers, is dropped once no caller still holds the session.
    pub fn close(&self, id: SessionId) -> RewindResult<()> {
        let mut inner = self.lock();
        if inner.sessions.remove(&id).is_none() {
            return Err(RewindError::UnknownSession(id.0));
        }
        inner.order.retain(|other| *other != id);
        info!(session = %id, open = inner.order.len(), "undo session closed");
        Ok(())
    }

    /// Run `f` against a registered session while holding its lock.
    pub fn with_session<F, T>(&self, id: SessionId, f: F) -> RewindResult<T>
    where
        F: FnOnce(&UndoSession) -> RewindResult<T>,
    {
        let session = self.get(id).ok_or(RewindError::UnknownSession(id.0))?;
        let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(session = %id, "session locked");
        f(&guard)
    }

    pub fn len(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
