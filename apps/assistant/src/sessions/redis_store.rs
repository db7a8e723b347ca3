use async_trait::async_trait;
use redis::Client as RedisClient;
use tracing::debug;
use uuid::Uuid;

use super::SessionStore;
use crate::errors::AppError;
use crate::interview::session::InterviewSession;

const KEY_PREFIX: &str = "assistant:session:";

/// Sessions as JSON strings under `assistant:session:{id}`, refreshed with `EX ttl` on
/// every save.
pub struct RedisSessionStore {
    client: RedisClient,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(store_error)
    }
}

pub fn session_key(id: Uuid) -> String {
    format!("{KEY_PREFIX}{id}")
}

fn store_error(e: impl std::fmt::Display) -> AppError {
    AppError::SessionStore(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<InterviewSession>, AppError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(id))
            .query_async::<_, Option<String>>(&mut conn)
            .await
            .map_err(store_error)?;

        raw.map(|json| serde_json::from_str(&json).map_err(store_error))
            .transpose()
    }

    async fn save(&self, id: Uuid, session: &InterviewSession) -> Result<(), AppError> {
        let payload = serde_json::to_string(session).map_err(store_error)?;
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(session_key(id))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(store_error)?;
        debug!("Saved session {id} (ttl {}s)", self.ttl_secs);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_is_namespaced() {
        let id = Uuid::nil();
        assert_eq!(
            session_key(id),
            "assistant:session:00000000-0000-0000-0000-000000000000"
        );
    }
}
