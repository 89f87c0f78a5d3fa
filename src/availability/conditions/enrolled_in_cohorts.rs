//! Cohort restriction.
//!
//! Options can be reserved for members of certain cohorts. The required
//! cohort idnumbers are configured per option as JSON (this is the one
//! built-in rule that is JSON-configurable); the user's memberships arrive
//! prefetched in the context. An empty requirement list means no
//! restriction.

use crate::constants::condition_ids;
use crate::lang::{get_string, get_string_with};
use crate::models::BookingOptionSettings;

use super::super::context::EvalContext;
use super::super::types::{ButtonKind, PrePageKind, SqlFragments, Verdict};
use super::super::Condition;

pub struct EnrolledInCohorts;

impl Condition for EnrolledInCohorts {
    fn id(&self) -> i32 {
        condition_ids::ENROLLED_IN_COHORTS
    }

    fn is_json_configurable(&self) -> bool {
        true
    }

    fn is_available(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        invert: bool,
    ) -> bool {
        let mut available = settings.cohort_idnumbers.is_empty()
            || settings
                .cohort_idnumbers
                .iter()
                .any(|required| ctx.cohorts.contains(required));
        if invert {
            available = !available;
        }
        available
    }

    fn sql_filter(&self, ctx: &EvalContext) -> SqlFragments {
        // Hide cohort-gated options from bulk lists when the user is not a
        // member, instead of showing blocked rows.
        if ctx.user_id().is_none() {
            return SqlFragments::default();
        }
        // `{param}` markers are replaced by positional binds when the
        // fragment is pushed into a query builder.
        SqlFragments {
            where_clause: "(options.availability -> 'cohorts' IS NULL \
                 OR options.availability -> 'cohorts' = '[]'::jsonb \
                 OR options.availability -> 'cohorts' ?| {param})"
                .to_string(),
            params: vec![serde_json::json!(ctx.cohorts)],
            ..Default::default()
        }
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
        } else if full {
            get_string_with(
                "condition_cohorts_blocked_full",
                &[("cohorts", &settings.cohort_idnumbers.join(", "))],
            )
        } else {
            get_string("condition_cohorts_blocked")
        };
        Verdict {
            condition_id: self.id(),
            available,
            description,
            pre_page: PrePageKind::None,
            button: ButtonKind::AlertOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::fixtures;
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_unrestricted_option_passes() {
        let condition = EnrolledInCohorts;
        let settings = fixtures::settings();
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert!(condition.is_available(&settings, &ctx, false));
    }

    #[test]
    fn test_membership_in_any_required_cohort_passes() {
        let condition = EnrolledInCohorts;
        let mut settings = fixtures::settings();
        settings.cohort_idnumbers = vec!["alpha".to_string(), "beta".to_string()];

        let member = fixtures::ctx_authenticated(Uuid::new_v4())
            .with_cohorts(vec!["beta".to_string(), "gamma".to_string()]);
        assert!(condition.is_available(&settings, &member, false));

        let outsider =
            fixtures::ctx_authenticated(Uuid::new_v4()).with_cohorts(vec!["gamma".to_string()]);
        assert!(!condition.is_available(&settings, &outsider, false));
    }

    #[test]
    fn test_inversion_law() {
        let condition = EnrolledInCohorts;
        let mut settings = fixtures::settings();
        settings.cohort_idnumbers = vec!["alpha".to_string()];
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        assert_eq!(
            condition.is_available(&settings, &ctx, true),
            !condition.is_available(&settings, &ctx, false)
        );
    }

    #[test]
    fn test_is_json_configurable() {
        assert!(EnrolledInCohorts.is_json_configurable());
        assert!(!EnrolledInCohorts.overridable_by_billboard());
    }

    #[test]
    fn test_sql_filter_only_for_known_users() {
        let condition = EnrolledInCohorts;
        assert!(condition.sql_filter(&fixtures::ctx_anonymous()).is_empty());

        let ctx =
            fixtures::ctx_authenticated(Uuid::new_v4()).with_cohorts(vec!["alpha".to_string()]);
        let fragments = condition.sql_filter(&ctx);
        assert!(fragments.where_clause.contains("cohorts"));
        assert_eq!(fragments.params.len(), 1);
    }

    #[test]
    fn test_full_description_lists_cohorts() {
        let condition = EnrolledInCohorts;
        let mut settings = fixtures::settings();
        settings.cohort_idnumbers = vec!["alpha".to_string(), "beta".to_string()];
        let ctx = fixtures::ctx_authenticated(Uuid::new_v4());
        let verdict = condition.describe(&settings, &ctx, true, false);
        assert!(verdict.description.contains("alpha, beta"));
    }
}
