//! Global settings repository

use sqlx::PgPool;

use crate::{error::AppResult, models::GlobalSettings};

/// Repository for the component-scoped key/value settings table
pub struct SettingsRepository;

const COMPONENT: &str = "booking";

impl SettingsRepository {
    /// Load the current settings snapshot; missing rows fall back to
    /// defaults
    pub async fn load(pool: &PgPool) -> AppResult<GlobalSettings> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"SELECT name, value FROM global_settings WHERE component = $1"#,
        )
        .bind(COMPONENT)
        .fetch_all(pool)
        .await?;

        Ok(GlobalSettings::from_rows(
            rows.iter().map(|(n, v)| (n.as_str(), v.as_str())),
        ))
    }

    /// Upsert one setting
    pub async fn set(pool: &PgPool, name: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO global_settings (component, name, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (component, name) DO UPDATE SET value = $3
            "#,
        )
        .bind(COMPONENT)
        .bind(name)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }
}
