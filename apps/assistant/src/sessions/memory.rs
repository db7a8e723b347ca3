use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::SessionStore;
use crate::errors::AppError;
use crate::interview::session::InterviewSession;

struct Entry {
    session: InterviewSession,
    saved_at: Instant,
}

/// Process-local store. Entries expire `ttl` after their last save, matching the Redis
/// backend's `SET … EX` behaviour.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.saved_at) < self.ttl
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<InterviewSession>, AppError> {
        let now = Instant::now();
        Ok(self
            .sessions
            .read()
            .await
            .get(&id)
            .filter(|entry| self.is_live(entry, now))
            .map(|entry| entry.session.clone()))
    }

    async fn save(&self, id: Uuid, session: &InterviewSession) -> Result<(), AppError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| self.is_live(entry, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {evicted} expired sessions");
        }

        sessions.insert(
            id,
            Entry {
                session: session.clone(),
                saved_at: now,
            },
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::require;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_create_then_load_returns_fresh_session() {
        let store = MemorySessionStore::new(TTL);
        let id = store.create().await.unwrap();
        let session = store.load(id).await.unwrap().unwrap();
        assert_eq!(session, InterviewSession::default());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = MemorySessionStore::new(TTL);
        let id = store.create().await.unwrap();
        let session = InterviewSession {
            tech_stack: vec!["Rust".into()],
            ..Default::default()
        };
        store.save(id, &session).await.unwrap();
        assert_eq!(store.load(id).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = MemorySessionStore::new(TTL);
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
        let err = require(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sessions_expire_after_ttl() {
        let store = MemorySessionStore::new(TTL);
        let id = store.create().await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.load(id).await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.load(id).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_refreshes_expiry() {
        let store = MemorySessionStore::new(TTL);
        let id = store.create().await.unwrap();

        tokio::time::advance(Duration::from_secs(45)).await;
        store.save(id, &InterviewSession::default()).await.unwrap();
        tokio::time::advance(Duration::from_secs(45)).await;

        assert!(store.load(id).await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_sessions_are_evicted_on_save() {
        let store = MemorySessionStore::new(TTL);
        for _ in 0..100 {
            store.create().await.unwrap();
        }
        assert_eq!(store.sessions.read().await.len(), 100);

        tokio::time::advance(TTL).await;
        let id = store.create().await.unwrap();

        let sessions = store.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key(&id));
    }
}
