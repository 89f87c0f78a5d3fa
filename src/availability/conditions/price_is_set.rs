//! Pricing gate.
//!
//! A priced option is not booked directly: the rendered control forwards to
//! checkout, and the commit path refuses direct bookings. Absence of a price
//! row simply means pricing is disabled.

use crate::constants::condition_ids;
use crate::lang::get_string_with;
use crate::models::BookingOptionSettings;

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, ButtonPayload, PrePageKind, Verdict};
use super::super::Condition;

pub struct PriceIsSet;

impl PriceIsSet {
    fn price_label(&self, settings: &BookingOptionSettings, full: bool) -> String {
        let formatted = settings
            .price
            .as_ref()
            .map(|p| p.formatted())
            .unwrap_or_default();
        get_string_with(
            if full {
                "condition_price_set_full"
            } else {
                "condition_price_set"
            },
            &[("price", &formatted)],
        )
    }
}

impl Condition for PriceIsSet {
    fn id(&self) -> i32 {
        condition_ids::PRICE_IS_SET
    }

    fn is_available(
        &self,
        settings: &BookingOptionSettings,
        _ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = !settings.use_price();
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
            self.price_label(settings, full)
        };
        Verdict {
            condition_id: self.id(),
            available,
            description,
            pre_page: PrePageKind::Book,
            button: ButtonKind::Action,
        }
    }

    fn render_button(
        &self,
        settings: &BookingOptionSettings,
        _ctx: &EvalContext,
        full: bool,
        _invert: bool,
        fullwidth: bool,
    ) -> Option<ButtonPayload> {
        settings.price.as_ref()?;
        Some(ButtonPayload {
            label: self.price_label(settings, full),
            style: "btn btn-primary".to_string(),
            url: Some(format!("/checkout/options/{}", settings.id)),
            fullwidth,
        })
    }
}
