//! Session store
//!
//! Holds the small per-session values the booking flow needs across
//! requests; today that is the post-login return URL stashed by the login
//! condition. Backed by Redis in production; tests use the in-memory
//! implementation next to the tests that need it.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use crate::constants::{SESSION_WANTS_URL_PREFIX, SESSION_WANTS_URL_TTL_SECS};
use crate::error::AppResult;

/// Per-session key/value storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Remember where to send the user after the next successful login.
    async fn set_wants_url(&self, session_key: &str, url: &str) -> AppResult<()>;

    /// Fetch and clear the stored return URL.
    async fn take_wants_url(&self, session_key: &str) -> AppResult<Option<String>>;
}

/// Redis-backed session store.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(session_key: &str) -> String {
        format!("{SESSION_WANTS_URL_PREFIX}{session_key}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set_wants_url(&self, session_key: &str, url: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::key(session_key), url, SESSION_WANTS_URL_TTL_SECS)
            .await?;
        Ok(())
    }

    async fn take_wants_url(&self, session_key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let key = Self::key(session_key);
        let url: Option<String> = conn.get(&key).await?;
        if url.is_some() {
            let _: () = conn.del(&key).await?;
        }
        Ok(url)
    }
}
