//! Per-option booking kill switch.
//!
//! An option with booking disabled blocks everyone, first in the chain.

use crate::constants::condition_ids;
use crate::lang::get_string;
use crate::models::BookingOptionSettings;

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, PrePageKind, Verdict};
use super::super::Condition;

pub struct BookingDisabled;

impl Condition for BookingDisabled {
    fn id(&self) -> i32 {
        condition_ids::BOOKING_DISABLED
    }

    fn is_available(
        &self,
        settings: &BookingOptionSettings,
        _ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = !settings.booking_disabled;
        if invert {
            available = !available;
        }
        available
    }

    fn describe(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        _full: bool,
        invert: bool,
    ) -> Verdict {
        let available = self.is_available(settings, ctx, invert);
        let description = if available {
            String::new()
        } else {
            get_string("condition_booking_disabled")
        };
        Verdict {
            condition_id: self.id(),
            available,
            description,
            pre_page: PrePageKind::None,
            button: ButtonKind::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::fixtures;
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_disabled_option_blocks_everyone() {
        let condition = BookingDisabled;
        let mut settings = fixtures::settings();
        settings.booking_disabled = true;
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert!(!condition.is_available(&settings, &ctx, false));
        assert!(condition.hard_block(&settings, &ctx));
    }

    #[test]
    fn test_enabled_option_passes() {
        let condition = BookingDisabled;
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_anonymous();
        assert!(condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_inversion_law() {
        let condition = BookingDisabled;
        let ctx = fixtures::ctx_anonymous();
        for disabled in [false, true] {
            let mut settings = fixtures::settings();
            settings.booking_disabled = disabled;
            assert_eq!(
                condition.is_available(&settings, &ctx, true),
                !condition.is_available(&settings, &ctx, false)
            );
        }
    }
}
