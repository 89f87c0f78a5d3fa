//! Existing booking check.
//!
//! A user who already holds a booked place cannot book the option again.

use crate::constants::condition_ids;
use crate::lang::get_string;
use crate::models::BookingOptionSettings;

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, PrePageKind, Verdict};
use super::super::Condition;

pub struct AlreadyBooked;

impl Condition for AlreadyBooked {
    fn id(&self) -> i32 {
        condition_ids::ALREADY_BOOKED
    }

    fn is_available(
        &self,
        _settings: &BookingOptionSettings,
        ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = match ctx.user_id() {
            Some(user_id) => !ctx.answers.is_booked(user_id),
            None => true,
        };
        if invert {
            available = !available;
        }
        available
    }

    fn describe(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        full: bool,
        invert: bool,
    ) -> Verdict {
        let available = self.is_available(settings, ctx, invert);
        let description = if available {
            String::new()
        } else {
            get_string(if full {
                "condition_already_booked_full"
            } else {
                "condition_already_booked"
            })
        };
        Verdict {
            condition_id: self.id(),
            available,
            description,
            pre_page: PrePageKind::None,
            button: ButtonKind::Alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::fixtures;
    use super::*;
    use crate::models::AnswerStatus;
    use uuid::Uuid;

    #[test]
    fn test_booked_user_is_blocked() {
        let condition = AlreadyBooked;
        let settings = fixtures::settings();
        let user = Uuid::new_v4();
        let rows = vec![fixtures::answer_row(
            settings.id,
            user,
            AnswerStatus::Booked,
            1,
        )];
        let ctx =
            fixtures::ctx_authenticated(user).with_answers(fixtures::answers(&settings, &rows));
        assert!(!condition.is_available(&settings, &ctx, false));
        assert_eq!(
            condition.is_available(&settings, &ctx, true),
            !condition.is_available(&settings, &ctx, false)
        );
    }

    #[test]
    fn test_waiting_user_is_not_blocked_here() {
        let condition = AlreadyBooked;
        let settings = fixtures::settings();
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
    fn test_anonymous_user_passes() {
        let condition = AlreadyBooked;
        let settings = fixtures::settings();
        assert!(condition.is_available(&settings, &fixtures::ctx_anonymous(), false));
    }
}
