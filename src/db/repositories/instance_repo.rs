//! Booking instance repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::BookingInstance};

/// Repository for booking instance database operations
pub struct InstanceRepository;

impl InstanceRepository {
    /// Find instance by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<BookingInstance>> {
        let instance = sqlx::query_as::<_, BookingInstance>(
            r#"SELECT * FROM booking_instances WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(instance)
    }
}
