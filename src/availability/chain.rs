//! Condition chain aggregator.
//!
//! Evaluates the registered conditions in ascending id order against one
//! (settings, context) pair and combines the results: the first blocking
//! condition decides the UI (description, pre-page, button), while the
//! bookable flag short-circuits at the first blocker that also hard-blocks.
//! The full-status view collects every condition's verdict instead.

use uuid::Uuid;

use crate::models::BookingOptionSettings;

use super::context::EvalContext;
use super::types::{ButtonPayload, PagePayload, SqlFragments, Verdict};
use super::{BoxedCondition, ConditionRegistry};

/// Combined chain result for one evaluation.
#[derive(Debug, Clone)]
pub struct ChainStatus {
    /// Whether a booking could commit right now (no hard-blocking blocker).
    pub bookable: bool,
    /// Verdict of the first blocking condition, if any. The terminal book
    /// button counts as blocking, so a fully eligible user still gets a
    /// verdict telling the UI to render "Book now".
    pub blocking: Option<Verdict>,
}

pub struct ConditionChain {
    registry: ConditionRegistry,
}

impl ConditionChain {
    pub fn new(registry: ConditionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConditionRegistry {
        &self.registry
    }

    /// One pass over the chain: first blocking verdict plus the bookable
    /// decision. Stops at the first hard-blocking blocker; later conditions
    /// can change neither result.
    pub fn evaluate(&self, settings: &BookingOptionSettings, ctx: &EvalContext) -> ChainStatus {
        let mut blocking = None;
        for condition in self.registry.conditions() {
            if condition.is_available(settings, ctx, false) {
                continue;
            }
            if blocking.is_none() {
                blocking = Some(condition.describe(settings, ctx, false, false));
            }
            if condition.hard_block(settings, ctx) {
                return ChainStatus {
                    bookable: false,
                    blocking,
                };
            }
        }
        ChainStatus {
            bookable: true,
            blocking,
        }
    }

    /// Whether a booking could commit right now.
    pub fn can_book_now(&self, settings: &BookingOptionSettings, ctx: &EvalContext) -> bool {
        self.evaluate(settings, ctx).bookable
    }

    /// Every condition's verdict, for the staff/admin status view.
    pub fn full_status(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        full: bool,
    ) -> Vec<Verdict> {
        self.registry
            .conditions()
            .iter()
            .map(|condition| condition.describe(settings, ctx, full, false))
            .collect()
    }

    /// First blocking condition, if any.
    pub fn first_blocking(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
    ) -> Option<&BoxedCondition> {
        self.registry
            .conditions()
            .iter()
            .find(|condition| !condition.is_available(settings, ctx, false))
    }

    /// Call-to-action of the first blocking condition.
    pub fn render_button(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        full: bool,
        fullwidth: bool,
    ) -> Option<ButtonPayload> {
        self.first_blocking(settings, ctx)?
            .render_button(settings, ctx, full, false, fullwidth)
    }

    /// Interstitial pages contributed by any condition, chain order.
    pub fn render_pre_pages(&self, option_id: Uuid, ctx: &EvalContext) -> Vec<PagePayload> {
        self.registry
            .conditions()
            .iter()
            .map(|condition| condition.render_page(option_id, ctx))
            .filter(|page| !page.is_empty())
            .collect()
    }

    /// Merged SQL contributions of all conditions, for bulk list queries.
    pub fn sql_filters(&self, ctx: &EvalContext) -> SqlFragments {
        let mut merged = SqlFragments::default();
        for condition in self.registry.conditions() {
            merged.merge(condition.sql_filter(ctx));
        }
        merged
    }
}

impl Default for ConditionChain {
    fn default() -> Self {
        Self::new(ConditionRegistry::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::constants::condition_ids;
    use crate::models::{AnswerStatus, Capability, Price};
    use uuid::Uuid;

    #[test]
    fn test_eligible_user_stops_at_book_button() {
        let chain = ConditionChain::default();
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());

        let status = chain.evaluate(&settings, &ctx);
        assert!(status.bookable);
        let blocking = status.blocking.unwrap();
        assert_eq!(blocking.condition_id, condition_ids::BOOK_IT);

        let button = chain.render_button(&settings, &ctx, false, true).unwrap();
        assert_eq!(button.label, "Book now");
    }

    #[test]
    fn test_anonymous_user_blocks_on_login() {
        let chain = ConditionChain::default();
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_anonymous();

        let status = chain.evaluate(&settings, &ctx);
        assert!(!status.bookable);
        assert_eq!(
            status.blocking.unwrap().condition_id,
            condition_ids::IS_LOGGED_IN
        );

        // The login button comes from the blocking condition.
        let button = chain.render_button(&settings, &ctx, false, true).unwrap();
        assert_eq!(button.url.as_deref(), Some("/login"));
    }

    #[test]
    fn test_disabled_option_blocks_before_login() {
        let chain = ConditionChain::default();
        let mut settings = fixtures::settings();
        settings.booking_disabled = true;
        let ctx = fixtures::ctx_anonymous();

        let status = chain.evaluate(&settings, &ctx);
        assert!(!status.bookable);
        assert_eq!(
            status.blocking.unwrap().condition_id,
            condition_ids::BOOKING_DISABLED
        );
    }

    #[test]
    fn test_confirmation_funnel_blocks_commit() {
        let chain = ConditionChain::default();
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());

        let status = chain.evaluate(&settings, &ctx);
        assert!(!status.bookable);
        assert_eq!(
            status.blocking.unwrap().condition_id,
            condition_ids::ASK_FOR_CONFIRMATION
        );
    }

    #[test]
    fn test_overbook_capability_skips_confirmation() {
        let chain = ConditionChain::default();
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;
        let mut ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        ctx.config.allow_overbooking = true;
        ctx.capabilities.insert(Capability::Overbook);

        let status = chain.evaluate(&settings, &ctx);
        assert!(status.bookable);
        assert_eq!(
            status.blocking.unwrap().condition_id,
            condition_ids::BOOK_IT
        );
    }

    #[test]
    fn test_priced_option_surfaces_checkout() {
        let chain = ConditionChain::default();
        let mut settings = fixtures::settings();
        settings.price = Some(Price {
            option_id: settings.id,
            amount_cents: 2500,
            currency: "EUR".to_string(),
        });
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());

        let status = chain.evaluate(&settings, &ctx);
        assert!(!status.bookable);
        assert_eq!(
            status.blocking.unwrap().condition_id,
            condition_ids::PRICE_IS_SET
        );
        let button = chain.render_button(&settings, &ctx, false, true).unwrap();
        assert!(button.url.unwrap().contains("/checkout/"));
    }

    #[test]
    fn test_full_status_reports_every_condition() {
        let chain = ConditionChain::default();
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_anonymous();

        let verdicts = chain.full_status(&settings, &ctx, true);
        assert_eq!(verdicts.len(), chain.registry().conditions().len());
        // Ascending id order is preserved.
        assert!(verdicts.windows(2).all(|w| w[0].condition_id < w[1].condition_id));
        // The login verdict is present and blocking even though the chain
        // would short-circuit there for the booking decision.
        assert!(verdicts
            .iter()
            .any(|v| v.condition_id == condition_ids::IS_LOGGED_IN && !v.available));
    }

    #[test]
    fn test_inversion_law_for_every_builtin() {
        let chain = ConditionChain::default();
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;
        settings.cohort_idnumbers = vec!["alpha".to_string()];
        let user = Uuid::new_v4();
        let rows = vec![fixtures::answer_row(
            settings.id,
            user,
            AnswerStatus::Booked,
            1,
        )];
        let ctx =
            fixtures::ctx_authenticated(user).with_answers(fixtures::answers(&settings, &rows));

        for condition in chain.registry().conditions() {
            assert_eq!(
                condition.is_available(&settings, &ctx, true),
                !condition.is_available(&settings, &ctx, false),
                "inversion law violated by condition {}",
                condition.id()
            );
        }
    }

    #[test]
    fn test_pre_pages_collected_from_contributing_conditions() {
        let chain = ConditionChain::default();
        let option_id = Uuid::new_v4();
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        let pages = chain.render_pre_pages(option_id, &ctx);
        assert!(!pages.is_empty());
        assert!(pages.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn test_sql_filters_merge_cohort_contribution() {
        let chain = ConditionChain::default();
        let ctx =
            fixtures::ctx_authenticated(Uuid::new_v4()).with_cohorts(vec!["alpha".to_string()]);
        let fragments = chain.sql_filters(&ctx);
        assert!(fragments.where_clause.contains("cohorts"));
    }
}
