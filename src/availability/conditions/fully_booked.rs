//! Capacity check.
//!
//! Blocks once every regular place and every waiting-list place is taken.
//! A full option whose waiting list still has room deliberately passes:
//! later rules divert such requests to the waiting list.

use crate::constants::condition_ids;
use crate::lang::get_string;
use crate::models::BookingOptionSettings;

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, PrePageKind, Verdict};
use super::super::Condition;

pub struct FullyBooked;

impl Condition for FullyBooked {
    fn id(&self) -> i32 {
        condition_ids::FULLY_BOOKED
    }

    fn is_available(
        &self,
        _settings: &BookingOptionSettings,
        ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = !(ctx.answers.fully_booked() && ctx.answers.waitlist_full());
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
                "condition_fully_booked_full"
            } else {
                "condition_fully_booked"
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
