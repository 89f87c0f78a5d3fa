//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::availability::ConditionChain;
use crate::config::Config;
use crate::session::RedisSessionStore;
use crate::shortcodes::table::{PgOptionCatalog, RedisTableCache};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Redis connection manager
    redis: ConnectionManager,

    /// The availability condition chain, built once at startup
    chain: ConditionChain,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, redis: ConnectionManager, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                redis,
                chain: ConditionChain::default(),
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager
    pub fn redis(&self) -> ConnectionManager {
        self.inner.redis.clone()
    }

    /// Get a reference to the condition chain
    pub fn chain(&self) -> &ConditionChain {
        &self.inner.chain
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Session store over the Redis connection
    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore::new(self.redis())
    }

    /// Option catalog over the database pool
    pub fn option_catalog(&self) -> PgOptionCatalog {
        PgOptionCatalog::new(self.inner.db.clone())
    }

    /// Table spec cache over the Redis connection
    pub fn table_cache(&self) -> RedisTableCache {
        RedisTableCache::new(self.redis())
    }
}
