//! Cohort repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Repository for cohort membership lookups
pub struct CohortRepository;

impl CohortRepository {
    /// Idnumbers of every cohort the user belongs to
    pub async fn idnumbers_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT c.idnumber
            FROM cohorts c
            JOIN cohort_members cm ON cm.cohort_id = c.id
            WHERE cm.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(idnumber,)| idnumber).collect())
    }
}
