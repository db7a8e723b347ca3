//! Session storage — pluggable, trait-based store for `InterviewSession` values.
//!
//! Default: `MemorySessionStore` (process-local, lost on restart).
//! `RedisSessionStore` is selected at startup when `REDIS_URL` is set. Either way, entries
//! expire `SESSION_TTL_SECS` after their last save.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::InterviewSession;

pub mod memory;
pub mod redis_store;

pub use self::memory::MemorySessionStore;
pub use self::redis_store::RedisSessionStore;

/// Carried in `AppState` as `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a fresh session and returns its id.
    async fn create(&self) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        self.save(id, &InterviewSession::default()).await?;
        Ok(id)
    }

    async fn load(&self, id: Uuid) -> Result<Option<InterviewSession>, AppError>;

    async fn save(&self, id: Uuid, session: &InterviewSession) -> Result<(), AppError>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;
}

/// Loads a session or fails with `NotFound`.
pub async fn require(store: &dyn SessionStore, id: Uuid) -> Result<InterviewSession, AppError> {
    store
        .load(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}
