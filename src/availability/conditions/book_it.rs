//! Terminal booking control.
//!
//! Always "blocks": the chain stops here for users who passed every real
//! rule, and the blocking verdict is what surfaces the "Book now" button.
//! Unlike every other rule it never hard-blocks, so the commit path treats
//! a chain that stopped here as bookable.

use crate::constants::condition_ids;
use crate::lang::get_string;
use crate::models::BookingOptionSettings;

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, ButtonPayload, PagePayload, PrePageKind, Verdict};
use super::super::Condition;

pub struct BookIt;

impl Condition for BookIt {
    fn id(&self) -> i32 {
        condition_ids::BOOK_IT
    }

    fn is_available(
        &self,
        _settings: &BookingOptionSettings,
        _ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = false;
        if invert {
            available = !available;
        }
        available
    }

    fn hard_block(&self, _settings: &BookingOptionSettings, _ctx: &EvalContext) -> bool {
        false
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
            description: get_string(if full {
                "condition_book_now_full"
            } else {
                "condition_book_now"
            }),
            pre_page: PrePageKind::Book,
            button: ButtonKind::Action,
        }
    }

    fn render_page(&self, option_id: uuid::Uuid, _ctx: &EvalContext) -> PagePayload {
        PagePayload {
            templates: vec!["booking/option_description_prepage".to_string()],
            data: vec![serde_json::json!({ "option_id": option_id })],
            continue_disabled: false,
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
        Some(ButtonPayload {
            label: get_string(if full {
                "condition_book_now_full"
            } else {
                "condition_book_now"
            }),
            style: "btn btn-primary".to_string(),
            url: Some(format!("/api/v1/options/{}/book", settings.id)),
            fullwidth,
        })
    }
}
