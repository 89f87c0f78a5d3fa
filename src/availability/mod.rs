//! Booking-option availability engine.
//!
//! Availability is decided by a chain of independent conditions: login
//! state, existing answers, cohort membership, capacity, confirmation
//! requirements, pricing. Each condition implements the uniform [`Condition`]
//! contract; the [`chain::ConditionChain`] composes them into one verdict
//! plus UI metadata (which pre-booking page or button to render).
//!
//! Conditions are stateless and pure: `is_available` reads only the settings
//! view and the prefetched [`context::EvalContext`] snapshot. The one
//! permitted side effect is stashing a post-login return URL in the context.

pub mod chain;
pub mod conditions;
pub mod context;
pub mod types;

use std::sync::Arc;

use uuid::Uuid;

use crate::models::BookingOptionSettings;

pub use chain::{ChainStatus, ConditionChain};
pub use context::{EvalContext, SessionState, SessionUser};
pub use types::{ButtonKind, ButtonPayload, PagePayload, PrePageKind, SqlFragments, Verdict};

/// Contract every availability condition implements.
///
/// Built-in conditions have hardcoded, immutable ids; the chain evaluates in
/// ascending id order. `invert` flips the final boolean of `is_available`,
/// which lets callers ask "is this condition currently blocking?" without a
/// second code path.
pub trait Condition: Send + Sync {
    /// Stable identifier, unique among registered conditions.
    fn id(&self) -> i32;

    /// Whether a site billboard announcement may replace this condition's
    /// blocked description.
    fn overridable_by_billboard(&self) -> bool {
        false
    }

    /// Whether the condition is configured per option via JSON (as opposed
    /// to being hardcoded).
    fn is_json_configurable(&self) -> bool {
        false
    }

    /// Core predicate: may the user proceed, as far as this rule is
    /// concerned? Must be pure over (settings, context, invert).
    fn is_available(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        invert: bool,
    ) -> bool;

    /// Optional SQL contribution for bulk list queries that should hide
    /// rows entirely. The default contributes nothing.
    fn sql_filter(&self, _ctx: &EvalContext) -> SqlFragments {
        SqlFragments::default()
    }

    /// Stricter gate checked immediately before a booking commits, for
    /// conditions whose `is_available` returned false. A true result refuses
    /// the commit; soft conditions (the terminal book button) override this
    /// to false.
    fn hard_block(&self, _settings: &BookingOptionSettings, _ctx: &EvalContext) -> bool {
        true
    }

    /// Human-readable verdict with UI hints. `full` selects the detailed
    /// staff view over the minimal student-facing one.
    fn describe(
        &self,
        settings: &BookingOptionSettings,
        ctx: &EvalContext,
        full: bool,
        invert: bool,
    ) -> Verdict;

    /// Optional interstitial page injected before the booking flow.
    fn render_page(&self, _option_id: Uuid, _ctx: &EvalContext) -> PagePayload {
        PagePayload::default()
    }

    /// Optional call-to-action control for this condition.
    fn render_button(
        &self,
        _settings: &BookingOptionSettings,
        _ctx: &EvalContext,
        _full: bool,
        _invert: bool,
        _fullwidth: bool,
    ) -> Option<ButtonPayload> {
        None
    }
}

/// A condition behind dynamic dispatch.
pub type BoxedCondition = Arc<dyn Condition>;

/// Registry error
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate condition id {0}")]
    DuplicateId(i32),
}

/// Explicit registration table mapping condition ids to instances.
///
/// No dynamic loading: every condition is registered here by hand and the
/// list is kept sorted by id, which fixes the evaluation order.
pub struct ConditionRegistry {
    conditions: Vec<BoxedCondition>,
}

impl ConditionRegistry {
    /// Registry with every built-in condition, in evaluation order.
    pub fn builtin() -> Self {
        use conditions::*;

        let mut conditions: Vec<BoxedCondition> = vec![
            Arc::new(BookingDisabled),
            Arc::new(IsLoggedIn),
            Arc::new(AlreadyBooked),
            Arc::new(OnWaitlist),
            Arc::new(EnrolledInCohorts),
            Arc::new(FullyBooked),
            Arc::new(AskForConfirmation),
            Arc::new(PriceIsSet),
            Arc::new(BookIt),
        ];
        conditions.sort_by_key(|c| c.id());
        debug_assert!(
            conditions.windows(2).all(|w| w[0].id() < w[1].id()),
            "built-in condition ids must be unique"
        );
        Self { conditions }
    }

    /// Register an additional condition. Fails on id collision; ids are
    /// immutable and globally unique.
    pub fn register(&mut self, condition: BoxedCondition) -> Result<(), RegistryError> {
        if self.contains(condition.id()) {
            return Err(RegistryError::DuplicateId(condition.id()));
        }
        self.conditions.push(condition);
        self.conditions.sort_by_key(|c| c.id());
        Ok(())
    }

    /// All conditions in ascending id order.
    pub fn conditions(&self) -> &[BoxedCondition] {
        &self.conditions
    }

    pub fn get(&self, id: i32) -> Option<&BoxedCondition> {
        self.conditions.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.get(id).is_some()
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Shared fixtures for condition tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use uuid::Uuid;

    use crate::models::{
        AnswerStatus, BookingAnswer, BookingAnswers, BookingOptionSettings, GlobalSettings,
    };

    use super::context::{EvalContext, SessionState, SessionUser};

    pub fn settings() -> BookingOptionSettings {
        BookingOptionSettings {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            course_id: Some(Uuid::new_v4()),
            title: "Rust for historians".to_string(),
            identifier: "RUSTHIST1".to_string(),
            max_answers: 2,
            max_overbooking: 2,
            wait_for_confirmation: false,
            booking_disabled: false,
            price: None,
            cohort_idnumbers: Vec::new(),
            course_start_time: None,
        }
    }

    pub fn answer_row(
        option_id: Uuid,
        user_id: Uuid,
        status: AnswerStatus,
        places: i32,
    ) -> BookingAnswer {
        BookingAnswer {
            id: Uuid::new_v4(),
            option_id,
            user_id,
            status: status.as_i16(),
            places,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn answers(settings: &BookingOptionSettings, rows: &[BookingAnswer]) -> BookingAnswers {
        BookingAnswers::from_rows(settings.id, settings.max_answers, settings.max_overbooking, rows)
    }

    pub fn session_user(id: Uuid) -> SessionUser {
        SessionUser {
            id,
            username: "alice".to_string(),
            role: "student".to_string(),
        }
    }

    pub fn ctx_authenticated(user_id: Uuid) -> EvalContext {
        EvalContext::new(
            SessionState::Authenticated(session_user(user_id)),
            GlobalSettings::default(),
        )
    }

    pub fn ctx_anonymous() -> EvalContext {
        EvalContext::new(SessionState::Anonymous, GlobalSettings::default())
    }

    pub fn ctx_guest() -> EvalContext {
        EvalContext::new(SessionState::Guest, GlobalSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::condition_ids;

    struct Dummy(i32);

    impl Condition for Dummy {
        fn id(&self) -> i32 {
            self.0
        }

        fn is_available(&self, _: &BookingOptionSettings, _: &EvalContext, invert: bool) -> bool {
            !invert
        }

        fn describe(
            &self,
            _: &BookingOptionSettings,
            _: &EvalContext,
            _: bool,
            _: bool,
        ) -> Verdict {
            Verdict {
                condition_id: self.0,
                available: true,
                description: String::new(),
                pre_page: PrePageKind::None,
                button: ButtonKind::None,
            }
        }
    }

    #[test]
    fn test_builtin_registry_is_sorted_and_unique() {
        let registry = ConditionRegistry::builtin();
        let ids: Vec<i32> = registry.conditions().iter().map(|c| c.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
        assert_eq!(ids.first().copied(), Some(condition_ids::BOOKING_DISABLED));
        assert_eq!(ids.last().copied(), Some(condition_ids::BOOK_IT));
    }

    #[test]
    fn test_register_rejects_duplicate_id() {
        let mut registry = ConditionRegistry::builtin();
        let err = registry
            .register(Arc::new(Dummy(condition_ids::BOOK_IT)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(_)));
    }

    #[test]
    fn test_register_keeps_order() {
        let mut registry = ConditionRegistry::builtin();
        registry.register(Arc::new(Dummy(15))).unwrap();
        let ids: Vec<i32> = registry.conditions().iter().map(|c| c.id()).collect();
        let position = ids.iter().position(|&id| id == 15).unwrap();
        assert_eq!(ids[position - 1], condition_ids::IS_LOGGED_IN);
    }
}
