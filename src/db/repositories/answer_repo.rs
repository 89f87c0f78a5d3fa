//! Booking answer repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{AnswerStatus, BookingAnswer},
};

/// Repository for booking answer database operations
pub struct AnswerRepository;

impl AnswerRepository {
    /// All answer rows of one option, freshest state straight from storage
    pub async fn rows_for_option(pool: &PgPool, option_id: &Uuid) -> AppResult<Vec<BookingAnswer>> {
        let rows = sqlx::query_as::<_, BookingAnswer>(
            r#"SELECT * FROM booking_answers WHERE option_id = $1 ORDER BY created_at"#,
        )
        .bind(option_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new answer for a user
    pub async fn insert(
        pool: &PgPool,
        option_id: &Uuid,
        user_id: &Uuid,
        status: AnswerStatus,
        places: i32,
    ) -> AppResult<BookingAnswer> {
        let answer = sqlx::query_as::<_, BookingAnswer>(
            r#"
            INSERT INTO booking_answers (option_id, user_id, status, places)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(option_id)
        .bind(user_id)
        .bind(status.as_i16())
        .bind(places)
        .fetch_one(pool)
        .await?;

        Ok(answer)
    }

    /// Move an answer to a new status (e.g. confirming a waiting entry)
    pub async fn update_status(
        pool: &PgPool,
        id: &Uuid,
        status: AnswerStatus,
    ) -> AppResult<BookingAnswer> {
        let answer = sqlx::query_as::<_, BookingAnswer>(
            r#"UPDATE booking_answers SET status = $2 WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(status.as_i16())
        .fetch_one(pool)
        .await?;

        Ok(answer)
    }
}
