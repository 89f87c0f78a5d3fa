//! Booking option repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookingOption, Price},
};

/// Repository for booking option database operations
pub struct OptionRepository;

impl OptionRepository {
    /// Create a new booking option
    pub async fn create(
        pool: &PgPool,
        booking_id: &Uuid,
        text: &str,
        description: Option<&str>,
        identifier: &str,
        max_answers: i32,
        max_overbooking: i32,
        wait_for_confirmation: bool,
        disable_booking: bool,
        availability: Option<&serde_json::Value>,
        course_start_time: Option<DateTime<Utc>>,
        course_end_time: Option<DateTime<Utc>>,
    ) -> AppResult<BookingOption> {
        let option = sqlx::query_as::<_, BookingOption>(
            r#"
            INSERT INTO booking_options (
                booking_id, text, description, identifier, max_answers,
                max_overbooking, wait_for_confirmation, disable_booking,
                availability, course_start_time, course_end_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(text)
        .bind(description)
        .bind(identifier)
        .bind(max_answers)
        .bind(max_overbooking)
        .bind(wait_for_confirmation)
        .bind(disable_booking)
        .bind(availability)
        .bind(course_start_time)
        .bind(course_end_time)
        .fetch_one(pool)
        .await?;

        Ok(option)
    }

    /// Find option by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<BookingOption>> {
        let option =
            sqlx::query_as::<_, BookingOption>(r#"SELECT * FROM booking_options WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(option)
    }

    /// List options of one booking instance
    pub async fn list_by_instance(
        pool: &PgPool,
        booking_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<BookingOption>> {
        let options = sqlx::query_as::<_, BookingOption>(
            r#"
            SELECT * FROM booking_options
            WHERE booking_id = $1
            ORDER BY created_at
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(booking_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(options)
    }

    /// Update option fields; unset fields keep their value
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        text: Option<&str>,
        description: Option<&str>,
        max_answers: Option<i32>,
        max_overbooking: Option<i32>,
        wait_for_confirmation: Option<bool>,
        disable_booking: Option<bool>,
        availability: Option<&serde_json::Value>,
    ) -> AppResult<BookingOption> {
        let option = sqlx::query_as::<_, BookingOption>(
            r#"
            UPDATE booking_options
            SET
                text = COALESCE($2, text),
                description = COALESCE($3, description),
                max_answers = COALESCE($4, max_answers),
                max_overbooking = COALESCE($5, max_overbooking),
                wait_for_confirmation = COALESCE($6, wait_for_confirmation),
                disable_booking = COALESCE($7, disable_booking),
                availability = COALESCE($8, availability),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(text)
        .bind(description)
        .bind(max_answers)
        .bind(max_overbooking)
        .bind(wait_for_confirmation)
        .bind(disable_booking)
        .bind(availability)
        .fetch_one(pool)
        .await?;

        Ok(option)
    }

    /// Delete an option and its dependent rows
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM booking_options WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Price attached to an option, if any
    pub async fn find_price(pool: &PgPool, option_id: &Uuid) -> AppResult<Option<Price>> {
        let price =
            sqlx::query_as::<_, Price>(r#"SELECT * FROM booking_prices WHERE option_id = $1"#)
                .bind(option_id)
                .fetch_optional(pool)
                .await?;

        Ok(price)
    }

    /// Attach or replace the price of an option
    pub async fn upsert_price(
        pool: &PgPool,
        option_id: &Uuid,
        amount_cents: i64,
        currency: &str,
    ) -> AppResult<Price> {
        let price = sqlx::query_as::<_, Price>(
            r#"
            INSERT INTO booking_prices (option_id, amount_cents, currency)
            VALUES ($1, $2, $3)
            ON CONFLICT (option_id)
            DO UPDATE SET amount_cents = $2, currency = $3
            RETURNING *
            "#,
        )
        .bind(option_id)
        .bind(amount_cents)
        .bind(currency)
        .fetch_one(pool)
        .await?;

        Ok(price)
    }
}
