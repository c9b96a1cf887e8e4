use pmem_core::{Attempt, ProjectContext};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::handle::SessionHandle;

/// One loaded [`ProjectContext`] per session.
#[derive(Debug, Default)]
pub struct ContextCache {
    entries: HashMap<SessionHandle, ProjectContext>,
}

impl ContextCache {
    pub fn get(&self, session: &SessionHandle) -> Option<&ProjectContext> {
        self.entries.get(session)
    }

    pub fn set(&mut self, session: &SessionHandle, context: ProjectContext) {
        debug!(session = %session, "Caching project context");
        self.entries.insert(session.clone(), context);
    }

    pub fn has(&self, session: &SessionHandle) -> bool {
        self.entries.contains_key(session)
    }

    /// Drop the session's context, returning it if one was cached.
    pub fn clear(&mut self, session: &SessionHandle) -> Option<ProjectContext> {
        self.entries.remove(session)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Attempts recorded during a session and not yet written back.
#[derive(Debug, Default)]
pub struct AttemptCache {
    entries: HashMap<SessionHandle, Vec<Attempt>>,
}

impl AttemptCache {
    /// Buffered attempts in insertion order; empty for unknown sessions.
    pub fn get(&self, session: &SessionHandle) -> &[Attempt] {
        self.entries.get(session).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add(&mut self, session: &SessionHandle, attempt: Attempt) {
        debug!(session = %session, issue = %attempt.issue_hash, "Buffering attempt");
        self.entries.entry(session.clone()).or_default().push(attempt);
    }

    /// Drop the session's buffer, returning what was in it.
    pub fn clear(&mut self, session: &SessionHandle) -> Vec<Attempt> {
        self.entries.remove(session).unwrap_or_default()
    }
}

/// Both caches plus the set of sessions opened through [`SessionCaches::init`].
#[derive(Debug, Default)]
pub struct SessionCaches {
    pub context: ContextCache,
    pub attempts: AttemptCache,
    live: HashSet<SessionHandle>,
}

impl SessionCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session. Re-opening a live id returns an equal handle and keeps
    /// its cached entries.
    pub fn init(&mut self, session_id: Option<&str>) -> SessionHandle {
        let handle = SessionHandle::new(session_id);
        if self.live.insert(handle.clone()) {
            debug!(session = %handle, "Session opened");
        }
        handle
    }

    pub fn is_live(&self, session: &SessionHandle) -> bool {
        self.live.contains(session)
    }

    /// Close a session and clear everything cached for it.
    pub fn teardown(&mut self, session: &SessionHandle) {
        self.context.clear(session);
        let dropped = self.attempts.clear(session);
        self.live.remove(session);
        debug!(session = %session, dropped_attempts = dropped.len(), "Session closed");
    }
}
