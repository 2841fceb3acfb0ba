//! The Session Store collaborator interface and the in-memory
//! implementation used in tests and single-process deployments.
//!
//! The load/save pair is the engine's unit of atomicity: there is no
//! optimistic concurrency check, so two concurrent mutations against the
//! same session race and the later save wins, silently discarding the
//! earlier mutation's effect. This is an accepted limitation of the
//! single-agent, turn-based calling pattern — do not add locking here
//! without changing the external contract.

use crate::error::Result;
use crate::model::QueryDocument;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;
use tokio::sync::Mutex;

/// Default inactivity window before a session expires.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session's document, or `None` if it does not exist or has
    /// expired.
    async fn load(&self, session_id: &str) -> Result<Option<QueryDocument>>;

    /// Persist a session's document, creating or replacing it.
    async fn save(&self, session_id: &str, document: QueryDocument) -> Result<()>;

    /// Drop a session. Returns whether it existed.
    async fn delete(&self, session_id: &str) -> Result<bool>;
}

struct StoredSession {
    document: QueryDocument,
    last_access: Instant,
}

/// In-memory [`SessionStore`] with sliding-window expiry. Entries are
/// swept lazily on access.
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, StoredSession>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn sweep(&self, entries: &mut HashMap<String, StoredSession>) {
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.last_access.elapsed() < ttl);
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<QueryDocument>> {
        let mut entries = self.entries.lock().await;
        self.sweep(&mut entries);
        Ok(entries.get_mut(session_id).map(|entry| {
            entry.last_access = Instant::now();
            entry.document.clone()
        }))
    }

    async fn save(&self, session_id: &str, document: QueryDocument) -> Result<()> {
        let mut entries = self.entries.lock().await;
        self.sweep(&mut entries);
        entries.insert(session_id.to_string(), StoredSession {
            document,
            last_access: Instant::now(),
        });
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<bool> {
        let mut entries = self.entries.lock().await;
        Ok(entries.remove(session_id).is_some())
    }
}
