//! Booking option models
//!
//! `BookingOption` is the raw database row. `BookingOptionSettings` is the
//! read-only view the availability chain evaluates against: the option row
//! joined with its instance, price, and parsed availability config. The
//! chain never mutates settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::booking::BookingInstance;

/// Booking option database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingOption {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub text: String,
    pub description: Option<String>,
    /// Short human-facing code, unique per instance
    pub identifier: String,
    /// Capacity; 0 means unlimited
    pub max_answers: i32,
    /// Waiting-list capacity; 0 means no waiting list
    pub max_overbooking: i32,
    pub wait_for_confirmation: bool,
    pub disable_booking: bool,
    /// Serialized availability config (cohort restrictions etc.)
    pub availability: Option<serde_json::Value>,
    pub course_start_time: Option<DateTime<Utc>>,
    pub course_end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price attached to a booking option
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Price {
    pub option_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
}

impl Price {
    /// Display form, e.g. "12.00 EUR"
    pub fn formatted(&self) -> String {
        format!(
            "{}.{:02} {}",
            self.amount_cents / 100,
            self.amount_cents % 100,
            self.currency
        )
    }
}

/// Availability config persisted on the option as JSON.
///
/// Malformed or absent config reads as "no restriction": the chain treats
/// missing settings as the feature being disabled, never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    /// Cohort idnumbers the user must be enrolled in (any of)
    #[serde(default)]
    pub cohorts: Vec<String>,
}

impl AvailabilityConfig {
    pub fn parse(value: Option<&serde_json::Value>) -> Self {
        value
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

/// Read-only settings view for one bookable option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingOptionSettings {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub course_id: Option<Uuid>,
    pub title: String,
    pub identifier: String,
    pub max_answers: i32,
    pub max_overbooking: i32,
    pub wait_for_confirmation: bool,
    pub booking_disabled: bool,
    pub price: Option<Price>,
    pub cohort_idnumbers: Vec<String>,
    pub course_start_time: Option<DateTime<Utc>>,
}

impl BookingOptionSettings {
    /// Assemble the settings view from its persisted parts.
    pub fn from_parts(
        option: &BookingOption,
        instance: Option<&BookingInstance>,
        price: Option<Price>,
    ) -> Self {
        let availability = AvailabilityConfig::parse(option.availability.as_ref());
        Self {
            id: option.id,
            booking_id: option.booking_id,
            course_id: instance.map(|i| i.course_id),
            title: option.text.clone(),
            identifier: option.identifier.clone(),
            max_answers: option.max_answers,
            max_overbooking: option.max_overbooking,
            wait_for_confirmation: option.wait_for_confirmation,
            booking_disabled: option.disable_booking,
            price,
            cohort_idnumbers: availability.cohorts,
            course_start_time: option.course_start_time,
        }
    }

    /// Pricing is enabled iff a price row exists.
    pub fn use_price(&self) -> bool {
        self.price.is_some()
    }

    /// URL of the option detail view, used for post-login redirects.
    pub fn view_url(&self) -> String {
        format!("/booking/{}/options/{}/view", self.booking_id, self.id)
    }
}
