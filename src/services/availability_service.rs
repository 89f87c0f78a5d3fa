//! Availability evaluation service
//!
//! Bridges the async storage world and the synchronous condition chain:
//! settings, answers, cohorts and global settings are read fresh from
//! storage per request (nothing is cached here), snapshotted into an
//! `EvalContext`, and the chain runs on the snapshot without further I/O.

use sqlx::PgPool;

use crate::{
    availability::{ChainStatus, ConditionChain, EvalContext, SessionState},
    db::repositories::{AnswerRepository, CohortRepository, SettingsRepository},
    error::AppResult,
    models::{capabilities_for_role, BookingAnswers, BookingOptionSettings},
};

/// Availability service
pub struct AvailabilityService;

impl AvailabilityService {
    /// Build the evaluation context for one (option, session) pair.
    pub async fn build_context(
        pool: &PgPool,
        settings: &BookingOptionSettings,
        session: SessionState,
    ) -> AppResult<EvalContext> {
        let (rows, config) = futures::try_join!(
            AnswerRepository::rows_for_option(pool, &settings.id),
            SettingsRepository::load(pool),
        )?;

        let answers = BookingAnswers::from_rows(
            settings.id,
            settings.max_answers,
            settings.max_overbooking,
            &rows,
        );

        let (capabilities, cohorts) = match &session {
            SessionState::Authenticated(user) => (
                capabilities_for_role(&user.role),
                CohortRepository::idnumbers_for_user(pool, &user.id).await?,
            ),
            _ => Default::default(),
        };

        Ok(EvalContext::new(session, config)
            .with_answers(answers)
            .with_capabilities(capabilities)
            .with_cohorts(cohorts))
    }

    /// Context for evaluations not tied to one option, e.g. shortcode
    /// rendering: global settings and user capabilities, empty answers.
    pub async fn site_context(pool: &PgPool, session: SessionState) -> AppResult<EvalContext> {
        let config = SettingsRepository::load(pool).await?;
        let (capabilities, cohorts) = match &session {
            SessionState::Authenticated(user) => (
                capabilities_for_role(&user.role),
                CohortRepository::idnumbers_for_user(pool, &user.id).await?,
            ),
            _ => Default::default(),
        };
        Ok(EvalContext::new(session, config)
            .with_capabilities(capabilities)
            .with_cohorts(cohorts))
    }

    /// Evaluate the chain for one option, returning the context alongside
    /// the status so callers can flush session stashes or render buttons.
    pub async fn evaluate(
        pool: &PgPool,
        chain: &ConditionChain,
        settings: &BookingOptionSettings,
        session: SessionState,
    ) -> AppResult<(EvalContext, ChainStatus)> {
        let ctx = Self::build_context(pool, settings, session).await?;
        let status = chain.evaluate(settings, &ctx);
        tracing::debug!(
            option_id = %settings.id,
            bookable = status.bookable,
            blocking = status.blocking.as_ref().map(|v| v.condition_id),
            "Availability evaluated"
        );
        Ok((ctx, status))
    }
}
