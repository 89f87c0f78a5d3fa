//! User model and capabilities

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::roles;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Fine-grained permissions derived from a user's role.
///
/// The host's full permission framework stays external; the booking engine
/// only cares about this small set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May book beyond capacity limits when overbooking is allowed globally
    Overbook,
    /// May create, update and delete booking options
    ManageOptions,
    /// May run bulk-operation shortcodes and tables
    RunBulkOperations,
}

/// Map a role to its capability set.
pub fn capabilities_for_role(role: &str) -> HashSet<Capability> {
    match role {
        roles::ADMIN | roles::MANAGER => [
            Capability::Overbook,
            Capability::ManageOptions,
            Capability::RunBulkOperations,
        ]
        .into_iter()
        .collect(),
        roles::TEACHER => [Capability::ManageOptions].into_iter().collect(),
        _ => HashSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_all_capabilities() {
        let caps = capabilities_for_role(roles::ADMIN);
        assert!(caps.contains(&Capability::Overbook));
        assert!(caps.contains(&Capability::RunBulkOperations));
    }

    #[test]
    fn test_student_has_none() {
        assert!(capabilities_for_role(roles::STUDENT).is_empty());
        assert!(capabilities_for_role(roles::GUEST).is_empty());
    }
}
