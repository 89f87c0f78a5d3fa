//! Login requirement.
//!
//! Only authenticated non-guest users may book. The session state itself is
//! owned by the auth layer; this rule only inspects the snapshot in the
//! context. When blocking, the rendered button sends the user to the login
//! page and, depending on two independent site toggles, stashes a return
//! URL so the user lands back on the option after logging in.

use crate::constants::condition_ids;
use crate::lang::get_string;
use crate::models::BookingOptionSettings;

use super::super::context::{EvalContext, SessionState};
use super::super::types::{ButtonKind, ButtonPayload, PrePageKind, Verdict};
use super::super::Condition;

pub struct IsLoggedIn;

impl IsLoggedIn {
    fn description_string(&self, available: bool, full: bool) -> String {
        if available {
            get_string(if full {
                "condition_login_ok_full"
            } else {
                "condition_login_ok"
            })
        } else {
            get_string(if full {
                "condition_login_blocked_full"
            } else {
                "condition_login_blocked"
            })
        }
    }
}

impl Condition for IsLoggedIn {
    fn id(&self) -> i32 {
        condition_ids::IS_LOGGED_IN
    }

    fn is_available(
        &self,
        _settings: &BookingOptionSettings,
        ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = matches!(ctx.session, SessionState::Authenticated(_));
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
        Verdict {
            condition_id: self.id(),
            available,
            description: self.description_string(available, full),
            pre_page: PrePageKind::None,
            button: ButtonKind::AlertOnly,
        }
    }

    fn render_button(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        full: bool,
        _invert: bool,
        fullwidth: bool,
    ) -> Option<ButtonPayload> {
        let label = self.description_string(false, full);
        let style = format!("btn btn-{}", ctx.config.login_button_style);

        let mut return_url = None;
        if ctx.config.show_details_to_all {
            return_url = Some(settings.view_url());
        }
        // The course redirect wins when both toggles are set.
        if ctx.config.redirect_on_login_to_course && settings.course_id.is_some() {
            return_url = Some(format!("{}?redirecttocourse=1", settings.view_url()));
        }
        // With neither toggle set, the login page keeps its default
        // post-login destination.
        if let Some(url) = return_url {
            ctx.stash.set_wants_url(url);
        }

        Some(ButtonPayload {
            label,
            style,
            url: Some("/login".to_string()),
            fullwidth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::fixtures;
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_authenticated_user_is_available_regardless_of_settings() {
        let condition = IsLoggedIn;
        let mut settings = fixtures::settings();
        settings.booking_disabled = true;
        settings.wait_for_confirmation = true;
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert!(condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_guest_and_anonymous_are_blocked() {
        let condition = IsLoggedIn;
        let settings = fixtures::settings();
        assert!(!condition.is_available(&settings, &fixtures::ctx_guest(), false));
        assert!(!condition.is_available(&settings, &fixtures::ctx_anonymous(), false));
    }

    #[test]
    fn test_inversion_law() {
        let condition = IsLoggedIn;
        let settings = fixtures::settings();
        for ctx in [
            fixtures::ctx_anonymous(),
            fixtures::ctx_guest(),
            fixtures::ctx_authenticated(Uuid::new_v4()),
        ] {
            assert_eq!(
                condition.is_available(&settings, &ctx, true),
                !condition.is_available(&settings, &ctx, false)
            );
        }
    }

    #[test]
    fn test_button_without_toggles_has_no_return_url() {
        let condition = IsLoggedIn;
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_anonymous();
        let button = condition
            .render_button(&settings, &ctx, false, false, true)
            .unwrap();
        assert_eq!(button.url.as_deref(), Some("/login"));
        assert_eq!(ctx.stash.take_wants_url(), None);
    }

    #[test]
    fn test_button_with_show_details_stashes_option_url() {
        let condition = IsLoggedIn;
        let settings = fixtures::settings();
        let mut ctx = fixtures::ctx_anonymous();
        ctx.config.show_details_to_all = true;
        condition.render_button(&settings, &ctx, false, false, true);
        assert_eq!(ctx.stash.take_wants_url(), Some(settings.view_url()));
    }

    #[test]
    fn test_course_redirect_toggle_wins() {
        let condition = IsLoggedIn;
        let settings = fixtures::settings();
        let mut ctx = fixtures::ctx_anonymous();
        ctx.config.show_details_to_all = true;
        ctx.config.redirect_on_login_to_course = true;
        condition.render_button(&settings, &ctx, false, false, true);
        let url = ctx.stash.take_wants_url().unwrap();
        assert!(url.ends_with("?redirecttocourse=1"));
    }

    #[test]
    fn test_button_style_follows_config() {
        let condition = IsLoggedIn;
        let settings = fixtures::settings();
        let mut ctx = fixtures::ctx_anonymous();
        ctx.config.login_button_style = "danger".to_string();
        let button = condition
            .render_button(&settings, &ctx, false, false, true)
            .unwrap();
        assert_eq!(button.style, "btn btn-danger");
    }
}
