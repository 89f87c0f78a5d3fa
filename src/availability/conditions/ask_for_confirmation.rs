//! Confirmation requirement.
//!
//! Booking requests for certain options do not book directly: they land on
//! the waiting list until someone confirms them. The rule blocks when the
//! user is not already waiting AND either the option explicitly asks for
//! confirmation, or pricing is enabled and the remaining waitlist capacity
//! makes a request the only way in (fully booked, or others already
//! waiting). A block here is a diversion, not a refusal: the booking service
//! turns it into a waiting-list entry.

use crate::constants::condition_ids;
use crate::lang::get_string;
use crate::models::{BookingOptionSettings, Capability};

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, ButtonPayload, PagePayload, PrePageKind, Verdict};
use super::super::Condition;

pub struct AskForConfirmation;

impl AskForConfirmation {
    fn description_string(&self, _available: bool, _full: bool) -> String {
        // No available/unavailable phrasing split here: when this rule
        // "blocks", the request simply proceeds to the waiting list, so the
        // same text is right either way.
        get_string("condition_ask_for_confirmation")
    }
}

impl Condition for AskForConfirmation {
    fn id(&self) -> i32 {
        condition_ids::ASK_FOR_CONFIRMATION
    }

    fn is_available(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = true;

        let on_waitlist = ctx
            .user_id()
            .map(|user_id| ctx.answers.on_waitlist(user_id))
            .unwrap_or(false);

        // Free waitlist places left for a request to land on.
        let waitlist_places_left = settings.max_overbooking > ctx.answers.waitlist_places();

        // Pricing forces the confirmation funnel once the option is full or
        // a queue has formed.
        let price_pressure = settings.use_price()
            && waitlist_places_left
            && (ctx.answers.fully_booked() || ctx.answers.waitlist_places() > 0);

        if !on_waitlist && (settings.wait_for_confirmation || price_pressure) {
            available = ctx.config.allow_overbooking && ctx.has_capability(Capability::Overbook);
        }

        if invert {
            available = !available;
        }
        available
    }

    fn hard_block(&self, _settings: &BookingOptionSettings, _ctx: &EvalContext) -> bool {
        // A blocked confirmation request must never commit as a direct
        // booking; the service diverts it to the waiting list instead.
        true
    }

    fn describe(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        full: bool,
        invert: bool,
    ) -> Verdict {
        let available = self.is_available(settings, ctx, invert);
        Verdict {
            condition_id: self.id(),
            available,
            description: self.description_string(available, full),
            pre_page: PrePageKind::Book,
            button: ButtonKind::Action,
        }
    }

    fn render_page(&self, option_id: uuid::Uuid, ctx: &EvalContext) -> PagePayload {
        let user_status = ctx.user_id().and_then(|id| ctx.answers.status_of(id));
        PagePayload {
            templates: vec![
                "booking/option_description_prepage".to_string(),
                "booking/bookit_button".to_string(),
            ],
            data: vec![
                serde_json::json!({ "option_id": option_id }),
                serde_json::json!({
                    "option_id": option_id,
                    "user_status": user_status,
                }),
            ],
            continue_disabled: false,
        }
    }

    fn render_button(
        &self,
        _settings: &BookingOptionSettings,
        _ctx: &EvalContext,
        full: bool,
        _invert: bool,
        fullwidth: bool,
    ) -> Option<ButtonPayload> {
        let label = self.description_string(false, full);
        Some(ButtonPayload {
            label,
            style: "btn btn-secondary mt-1 mb-1".to_string(),
            url: None,
            fullwidth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::fixtures;
    use super::*;
    use crate::models::AnswerStatus;
    use crate::models::Price;
    use uuid::Uuid;

    fn priced(settings: &mut BookingOptionSettings) {
        settings.price = Some(Price {
            option_id: settings.id,
            amount_cents: 1000,
            currency: "EUR".to_string(),
        });
    }

    #[test]
    fn test_plain_option_is_available() {
        // No confirmation flag, no pricing pressure, user not waiting.
        let condition = AskForConfirmation;
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert!(condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_wait_for_confirmation_blocks() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert!(!condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_user_already_waiting_is_not_blocked_again() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;
        let user = Uuid::new_v4();
        let rows = vec![fixtures::answer_row(
            settings.id,
            user,
            AnswerStatus::Waiting,
            1,
        )];
        let ctx =
            fixtures::ctx_authenticated(user).with_answers(fixtures::answers(&settings, &rows));
        assert!(condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_price_with_fully_booked_option_blocks() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        settings.max_answers = 1;
        priced(&mut settings);
        let rows = vec![fixtures::answer_row(
            settings.id,
            Uuid::new_v4(),
            AnswerStatus::Booked,
            1,
        )];
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4())
            .with_answers(fixtures::answers(&settings, &rows));
        assert!(!condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_price_with_queue_blocks_even_when_not_full() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        priced(&mut settings);
        let rows = vec![fixtures::answer_row(
            settings.id,
            Uuid::new_v4(),
            AnswerStatus::Waiting,
            1,
        )];
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4())
            .with_answers(fixtures::answers(&settings, &rows));
        assert!(!condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_price_without_waitlist_capacity_does_not_block() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        settings.max_answers = 1;
        settings.max_overbooking = 0;
        priced(&mut settings);
        let rows = vec![fixtures::answer_row(
            settings.id,
            Uuid::new_v4(),
            AnswerStatus::Booked,
            1,
        )];
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4())
            .with_answers(fixtures::answers(&settings, &rows));
        assert!(condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_price_alone_does_not_block() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        priced(&mut settings);
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert!(condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_overbooking_override_unblocks() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;

        let mut ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        ctx.config.allow_overbooking = true;
        ctx.capabilities.insert(Capability::Overbook);
        assert!(condition.is_available(&settings, &ctx, false));

        // Capability without the global switch is not enough.
        let mut ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        ctx.capabilities.insert(Capability::Overbook);
        assert!(!condition.is_available(&settings, &ctx, false));

        // Global switch without the capability is not enough either.
        let mut ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        ctx.config.allow_overbooking = true;
        assert!(!condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_inversion_law() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert_eq!(
            condition.is_available(&settings, &ctx, true),
            !condition.is_available(&settings, &ctx, false)
        );

        let plain = fixtures::settings();
        assert_eq!(
            condition.is_available(&plain, &ctx, true),
            !condition.is_available(&plain, &ctx, false)
        );
    }

    #[test]
    fn test_hard_block_is_always_true() {
        let condition = AskForConfirmation;
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert!(condition.hard_block(&settings, &ctx));

        let mut blocked = fixtures::settings();
        blocked.wait_for_confirmation = true;
        assert!(condition.hard_block(&blocked, &ctx));
    }

    #[test]
    fn test_description_ignores_availability() {
        let condition = AskForConfirmation;
        let mut settings = fixtures::settings();
        settings.wait_for_confirmation = true;
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());

        let blocked = condition.describe(&settings, &ctx, false, false);
        let open = condition.describe(&fixtures::settings(), &ctx, false, false);
        assert_ne!(blocked.available, open.available);
        assert_eq!(blocked.description, open.description);
    }
}
