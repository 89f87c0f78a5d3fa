//! Bulk-operations table engine.
//!
//! Tables render lazily: the container markup carries a hash under
//! `data-encodedtable`, the serialized table spec is cached under that hash,
//! and the frontend (or a test) re-instantiates the table from the cache to
//! page through its rows. The spec is plain data, so a table survives the
//! request that built it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::availability::SqlFragments;
use crate::constants::{TABLE_CACHE_PREFIX, TABLE_CACHE_TTL_SECS};
use crate::error::{AppError, AppResult};
use crate::utils::crypto::hash_string;
use crate::utils::time::now_utc;

/// Filter for bulk option listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionFilter {
    /// Include options regardless of course start time
    pub all: bool,
}

/// One row of a bulk option table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OptionTableRow {
    pub id: Uuid,
    pub text: String,
    pub identifier: String,
    pub instance_name: String,
    pub max_answers: i32,
    pub course_start_time: Option<DateTime<Utc>>,
}

/// Source of option rows for bulk tables.
#[async_trait]
pub trait OptionCatalog: Send + Sync {
    async fn count_rows(&self, filter: &OptionFilter, fragments: &SqlFragments)
        -> AppResult<i64>;

    async fn fetch_rows(
        &self,
        filter: &OptionFilter,
        fragments: &SqlFragments,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<OptionTableRow>>;
}

/// Cache for serialized table specs, keyed by their hash.
#[async_trait]
pub trait TableCache: Send + Sync {
    async fn put(&self, hash: &str, spec: &str) -> AppResult<()>;
    async fn get(&self, hash: &str) -> AppResult<Option<String>>;
}

/// Serializable description of a rendered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    pub id: String,
    pub columns: Vec<String>,
    pub filter: OptionFilter,
    pub fragments: SqlFragments,
}

/// The bulk-operations admin table over booking options.
pub struct OptionBulkOperationsTable {
    pub spec: TableSpec,
}

impl OptionBulkOperationsTable {
    pub fn new(table_id: &str, filter: OptionFilter, fragments: SqlFragments) -> Self {
        Self {
            spec: TableSpec {
                id: table_id.to_string(),
                columns: ["text", "identifier", "instance", "maxanswers", "actions"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                filter,
                fragments,
            },
        }
    }

    /// Render the lazy container markup and cache the spec under its hash.
    pub async fn render(
        &self,
        cache: &dyn TableCache,
        catalog: &dyn OptionCatalog,
    ) -> AppResult<String> {
        let spec_json = serde_json::to_string(&self.spec)?;
        let hash = hash_string(&spec_json);
        cache.put(&hash, &spec_json).await?;

        let total = catalog
            .count_rows(&self.spec.filter, &self.spec.fragments)
            .await?;

        Ok(format!(
            "<div id=\"{id}\" class=\"booking-bulk-table\" \
             data-encodedtable=\"{hash}\" data-totalrows=\"{total}\"></div>",
            id = self.spec.id,
        ))
    }

    /// Re-instantiate a table from its cache hash.
    pub async fn from_cache_hash(hash: &str, cache: &dyn TableCache) -> AppResult<Self> {
        let spec_json = cache
            .get(hash)
            .await?
            .ok_or_else(|| AppError::NotFound("Cached table spec not found".to_string()))?;
        let spec: TableSpec = serde_json::from_str(&spec_json)?;
        Ok(Self { spec })
    }

    /// Total rows the table reports.
    pub async fn total_rows(&self, catalog: &dyn OptionCatalog) -> AppResult<i64> {
        catalog
            .count_rows(&self.spec.filter, &self.spec.fragments)
            .await
    }

    /// One page of rows.
    pub async fn rows(
        &self,
        catalog: &dyn OptionCatalog,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<OptionTableRow>> {
        catalog
            .fetch_rows(&self.spec.filter, &self.spec.fragments, limit, offset)
            .await
    }
}

// =============================================================================
// Postgres catalog
// =============================================================================

/// Catalog over the booking_options table.
#[derive(Clone)]
pub struct PgOptionCatalog {
    pool: PgPool,
}

impl PgOptionCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Push the shared WHERE clause; `{param}` markers in contributed
    /// fragments become positional binds.
    fn push_where(
        builder: &mut QueryBuilder<'_, Postgres>,
        filter: &OptionFilter,
        fragments: &SqlFragments,
    ) {
        builder.push(" WHERE 1=1");
        if !filter.all {
            builder
                .push(" AND (options.course_start_time IS NULL OR options.course_start_time >= ")
                .push_bind(now_utc())
                .push(")");
        }
        if fragments.where_clause.is_empty() {
            return;
        }
        builder.push(" AND ");
        let mut params = fragments.params.iter();
        let mut parts = fragments.where_clause.split("{param}");
        if let Some(first) = parts.next() {
            builder.push(first.to_string());
        }
        for part in parts {
            match params.next() {
                Some(serde_json::Value::Array(items)) => {
                    let values: Vec<String> = items
                        .iter()
                        .filter_map(|v| v.as_str().map(String::from))
                        .collect();
                    builder.push_bind(values);
                }
                Some(serde_json::Value::String(s)) => {
                    builder.push_bind(s.clone());
                }
                Some(serde_json::Value::Number(n)) => {
                    builder.push_bind(n.as_i64().unwrap_or_default());
                }
                Some(serde_json::Value::Bool(b)) => {
                    builder.push_bind(*b);
                }
                _ => {
                    builder.push("NULL");
                }
            }
            builder.push(part.to_string());
        }
    }
}

#[async_trait]
impl OptionCatalog for PgOptionCatalog {
    async fn count_rows(
        &self,
        filter: &OptionFilter,
        fragments: &SqlFragments,
    ) -> AppResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM booking_options options \
             JOIN booking_instances instances ON instances.id = options.booking_id ",
        );
        builder.push(fragments.join.clone());
        Self::push_where(&mut builder, filter, fragments);

        let (count,): (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn fetch_rows(
        &self,
        filter: &OptionFilter,
        fragments: &SqlFragments,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<OptionTableRow>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT options.id, options.text, options.identifier, \
             instances.name AS instance_name, options.max_answers, \
             options.course_start_time \
             FROM booking_options options \
             JOIN booking_instances instances ON instances.id = options.booking_id ",
        );
        builder.push(fragments.join.clone());
        Self::push_where(&mut builder, filter, fragments);
        if fragments.order.is_empty() {
            builder.push(" ORDER BY options.created_at");
        } else {
            builder.push(" ORDER BY ").push(fragments.order.clone());
        }
        builder.push(" LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(offset);

        let rows = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

// =============================================================================
// Redis spec cache
// =============================================================================

/// Redis-backed table spec cache.
#[derive(Clone)]
pub struct RedisTableCache {
    conn: ConnectionManager,
}

impl RedisTableCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(hash: &str) -> String {
        format!("{TABLE_CACHE_PREFIX}{hash}")
    }
}

#[async_trait]
impl TableCache for RedisTableCache {
    async fn put(&self, hash: &str, spec: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::key(hash), spec, TABLE_CACHE_TTL_SECS)
            .await?;
        Ok(())
    }

    async fn get(&self, hash: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let spec: Option<String> = conn.get(Self::key(hash)).await?;
        Ok(spec)
    }
}
