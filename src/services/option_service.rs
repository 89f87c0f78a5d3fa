//! Booking option service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{InstanceRepository, OptionRepository},
    error::{AppError, AppResult},
    handlers::options::request::{CreateOptionRequest, UpdateOptionRequest},
    models::{BookingOption, BookingOptionSettings},
    utils::crypto::generate_identifier_code,
    utils::validation::{validate_identifier, validate_option_title},
};

/// Booking option service for business logic
pub struct OptionService;

impl OptionService {
    /// Create a new booking option inside an instance
    pub async fn create_option(
        pool: &PgPool,
        payload: CreateOptionRequest,
    ) -> AppResult<BookingOption> {
        InstanceRepository::find_by_id(pool, &payload.booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking instance not found".to_string()))?;

        let title = validate_option_title(&payload.text)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let identifier = match payload.identifier {
            Some(identifier) => {
                validate_identifier(&identifier)
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                identifier
            }
            None => generate_identifier_code(),
        };

        let option = OptionRepository::create(
            pool,
            &payload.booking_id,
            &title,
            payload.description.as_deref(),
            &identifier,
            payload.max_answers.unwrap_or(0),
            payload.max_overbooking.unwrap_or(0),
            payload.wait_for_confirmation.unwrap_or(false),
            payload.disable_booking.unwrap_or(false),
            payload.availability.as_ref(),
            payload.course_start_time,
            payload.course_end_time,
        )
        .await?;

        if let Some(price) = payload.price {
            OptionRepository::upsert_price(pool, &option.id, price.amount_cents, &price.currency)
                .await?;
        }

        tracing::info!(option_id = %option.id, identifier = %option.identifier, "Booking option created");
        Ok(option)
    }

    /// Get option by ID
    pub async fn get_option(pool: &PgPool, id: &Uuid) -> AppResult<BookingOption> {
        OptionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking option not found".to_string()))
    }

    /// List options of one instance
    pub async fn list_options(
        pool: &PgPool,
        booking_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<BookingOption>> {
        OptionRepository::list_by_instance(pool, booking_id, limit, offset).await
    }

    /// Update an option
    pub async fn update_option(
        pool: &PgPool,
        id: &Uuid,
        payload: UpdateOptionRequest,
    ) -> AppResult<BookingOption> {
        // Ensure it exists first for a clean 404
        Self::get_option(pool, id).await?;

        let option = OptionRepository::update(
            pool,
            id,
            payload.text.as_deref(),
            payload.description.as_deref(),
            payload.max_answers,
            payload.max_overbooking,
            payload.wait_for_confirmation,
            payload.disable_booking,
            payload.availability.as_ref(),
        )
        .await?;

        Ok(option)
    }

    /// Delete an option
    pub async fn delete_option(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        Self::get_option(pool, id).await?;
        OptionRepository::delete(pool, id).await
    }

    /// Assemble the read-only settings view the availability chain runs on.
    pub async fn get_settings(pool: &PgPool, option_id: &Uuid) -> AppResult<BookingOptionSettings> {
        let option = Self::get_option(pool, option_id).await?;

        let (instance, price) = futures::try_join!(
            InstanceRepository::find_by_id(pool, &option.booking_id),
            OptionRepository::find_price(pool, &option.id),
        )?;

        Ok(BookingOptionSettings::from_parts(
            &option,
            instance.as_ref(),
            price,
        ))
    }
}
