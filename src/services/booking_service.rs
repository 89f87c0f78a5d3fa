//! Booking commit flow
//!
//! The chain decides, this service commits. A hard-blocking condition
//! refuses the booking outright, with one deliberate exception: a block by
//! the confirmation rule diverts the request onto the waiting list instead
//! of refusing it. Races on the last place are left to the storage layer's
//! transactional guarantees.

use sqlx::PgPool;

use crate::{
    availability::{ConditionChain, EvalContext},
    constants::condition_ids,
    db::repositories::AnswerRepository,
    error::{AppError, AppResult},
    models::{AnswerStatus, BookingAnswer, BookingOptionSettings},
};

/// Outcome of a booking attempt
#[derive(Debug)]
pub enum BookOutcome {
    Booked(BookingAnswer),
    Waitlisted(BookingAnswer),
}

/// Booking service
pub struct BookingService;

impl BookingService {
    /// Attempt to book one place on an option for the context's user.
    pub async fn book(
        pool: &PgPool,
        chain: &ConditionChain,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
    ) -> AppResult<BookOutcome> {
        let user_id = ctx.user_id().ok_or(AppError::Unauthorized)?;

        let status = chain.evaluate(settings, ctx);
        if status.bookable {
            // Capacity exhausted but the chain let us through: the waiting
            // list still has room, so the answer lands there.
            let target = if ctx.answers.fully_booked() {
                AnswerStatus::Waiting
            } else {
                AnswerStatus::Booked
            };
            let answer =
                AnswerRepository::insert(pool, &settings.id, &user_id, target, 1).await?;
            tracing::info!(option_id = %settings.id, user_id = %user_id, status = ?target, "Booking committed");
            return Ok(match target {
                AnswerStatus::Booked => BookOutcome::Booked(answer),
                _ => BookOutcome::Waitlisted(answer),
            });
        }

        match status.blocking {
            Some(verdict) if verdict.condition_id == condition_ids::ASK_FOR_CONFIRMATION => {
                let answer =
                    AnswerRepository::insert(pool, &settings.id, &user_id, AnswerStatus::Waiting, 1)
                        .await?;
                tracing::info!(option_id = %settings.id, user_id = %user_id, "Booking request waitlisted for confirmation");
                Ok(BookOutcome::Waitlisted(answer))
            }
            Some(verdict) => {
                tracing::warn!(
                    option_id = %settings.id,
                    user_id = %user_id,
                    condition_id = verdict.condition_id,
                    "Booking refused by availability condition"
                );
                Err(AppError::BookingBlocked(verdict.description))
            }
            None => Err(AppError::Internal(anyhow::anyhow!(
                "chain reported unbookable without a blocking condition"
            ))),
        }
    }
}
