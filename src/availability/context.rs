//! Evaluation context for availability conditions.
//!
//! Conditions never touch ambient globals: everything they may read — who
//! the user is, what they may do, which cohorts they belong to, the global
//! settings snapshot and the current answer state — is assembled into an
//! `EvalContext` by the service layer before the chain runs. Evaluation is
//! therefore synchronous and free of I/O.

use std::collections::HashSet;
use std::sync::Mutex;

use uuid::Uuid;

use crate::models::{BookingAnswers, Capability, GlobalSettings};

/// Session state of the requesting user.
///
/// Guests have a session but no bookable identity; the login condition
/// treats them like anonymous visitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Guest,
    Authenticated(SessionUser),
}

/// Identity snapshot of a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

/// Deferred session writes produced during evaluation.
///
/// Conditions run synchronously on shared references; the only side effect
/// they are allowed is stashing a post-login return URL here. The handler
/// flushes the stash to the session store after the chain has run.
#[derive(Debug, Default)]
pub struct SessionStash {
    wants_url: Mutex<Option<String>>,
}

impl SessionStash {
    pub fn set_wants_url(&self, url: String) {
        if let Ok(mut slot) = self.wants_url.lock() {
            *slot = Some(url);
        }
    }

    pub fn take_wants_url(&self) -> Option<String> {
        self.wants_url.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Everything a condition may read during one evaluation.
#[derive(Debug)]
pub struct EvalContext {
    pub session: SessionState,
    pub capabilities: HashSet<Capability>,
    /// Cohort idnumbers the user is enrolled in
    pub cohorts: Vec<String>,
    pub config: GlobalSettings,
    pub answers: BookingAnswers,
    pub stash: SessionStash,
}

impl EvalContext {
    pub fn new(session: SessionState, config: GlobalSettings) -> Self {
        Self {
            session,
            capabilities: HashSet::new(),
            cohorts: Vec::new(),
            config,
            answers: BookingAnswers::default(),
            stash: SessionStash::default(),
        }
    }

    pub fn with_answers(mut self, answers: BookingAnswers) -> Self {
        self.answers = answers;
        self
    }

    pub fn with_capabilities(mut self, capabilities: HashSet<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_cohorts(mut self, cohorts: Vec<String>) -> Self {
        self.cohorts = cohorts;
        self
    }

    /// Id of the authenticated user, if any. Guests have none.
    pub fn user_id(&self) -> Option<Uuid> {
        match &self.session {
            SessionState::Authenticated(user) => Some(user.id),
            _ => None,
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_per_session_state() {
        let config = GlobalSettings::default();
        assert_eq!(
            EvalContext::new(SessionState::Anonymous, config.clone()).user_id(),
            None
        );
        assert_eq!(
            EvalContext::new(SessionState::Guest, config.clone()).user_id(),
            None
        );

        let id = Uuid::new_v4();
        let ctx = EvalContext::new(
            SessionState::Authenticated(SessionUser {
                id,
                username: "alice".to_string(),
                role: "student".to_string(),
            }),
            config,
        );
        assert_eq!(ctx.user_id(), Some(id));
    }

    #[test]
    fn test_stash_take_clears() {
        let stash = SessionStash::default();
        stash.set_wants_url("/somewhere".to_string());
        assert_eq!(stash.take_wants_url().as_deref(), Some("/somewhere"));
        assert_eq!(stash.take_wants_url(), None);
    }
}
