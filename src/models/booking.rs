//! Booking instance model
//!
//! A booking instance is the container activity inside a course; each
//! instance holds any number of bookable options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Booking instance database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingInstance {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub event_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
