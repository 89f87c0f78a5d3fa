//! Waiting-list membership check.
//!
//! A user already on the waiting list cannot file a second request.

use crate::constants::condition_ids;
use crate::lang::get_string;
use crate::models::BookingOptionSettings;

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, PrePageKind, Verdict};
use super::super::Condition;

pub struct OnWaitlist;

impl Condition for OnWaitlist {
    fn id(&self) -> i32 {
        condition_ids::ON_WAITLIST
    }

    fn is_available(
        &self,
        _settings: &BookingOptionSettings,
        ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = match ctx.user_id() {
            Some(user_id) => !ctx.answers.on_waitlist(user_id),
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
                "condition_on_waitlist_full"
            } else {
                "condition_on_waitlist"
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
