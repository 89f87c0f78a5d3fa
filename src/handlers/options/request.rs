//! Booking option request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_OPTION_DESCRIPTION_LENGTH, MAX_OPTION_TITLE_LENGTH};

/// Price payload attached to an option
#[derive(Debug, Deserialize, Validate)]
pub struct PriceRequest {
    #[validate(range(min = 0))]
    pub amount_cents: i64,

    #[validate(length(equal = 3))]
    pub currency: String,
}

/// Create option request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOptionRequest {
    pub booking_id: Uuid,

    #[validate(length(min = 1, max = MAX_OPTION_TITLE_LENGTH))]
    pub text: String,

    #[validate(length(max = MAX_OPTION_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    /// Short code; generated when absent
    pub identifier: Option<String>,

    /// Capacity; 0 or absent means unlimited
    #[validate(range(min = 0))]
    pub max_answers: Option<i32>,

    /// Waiting-list capacity
    #[validate(range(min = 0))]
    pub max_overbooking: Option<i32>,

    pub wait_for_confirmation: Option<bool>,
    pub disable_booking: Option<bool>,

    /// Availability config (e.g. `{"cohorts": ["alumni"]}`)
    pub availability: Option<serde_json::Value>,

    pub course_start_time: Option<DateTime<Utc>>,
    pub course_end_time: Option<DateTime<Utc>>,

    #[validate(nested)]
    pub price: Option<PriceRequest>,
}

/// Update option request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOptionRequest {
    #[validate(length(min = 1, max = MAX_OPTION_TITLE_LENGTH))]
    pub text: Option<String>,

    #[validate(length(max = MAX_OPTION_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub max_answers: Option<i32>,

    #[validate(range(min = 0))]
    pub max_overbooking: Option<i32>,

    pub wait_for_confirmation: Option<bool>,
    pub disable_booking: Option<bool>,
    pub availability: Option<serde_json::Value>,
}

/// List options query parameters
#[derive(Debug, Deserialize)]
pub struct ListOptionsQuery {
    pub booking_id: Uuid,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Availability query parameters
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Full (staff) detail view instead of the student-facing one
    pub full: Option<bool>,
    /// Client session key used to persist the post-login return URL
    pub session_key: Option<String>,
}
