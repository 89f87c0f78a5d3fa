//! Booking option response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::availability::{ButtonPayload, PagePayload, Verdict};
use crate::models::BookingOption;

/// Public view of a booking option
#[derive(Debug, Serialize)]
pub struct OptionResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub text: String,
    pub description: Option<String>,
    pub identifier: String,
    pub max_answers: i32,
    pub max_overbooking: i32,
    pub wait_for_confirmation: bool,
    pub disable_booking: bool,
    pub course_start_time: Option<DateTime<Utc>>,
    pub course_end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<BookingOption> for OptionResponse {
    fn from(option: BookingOption) -> Self {
        Self {
            id: option.id,
            booking_id: option.booking_id,
            text: option.text,
            description: option.description,
            identifier: option.identifier,
            max_answers: option.max_answers,
            max_overbooking: option.max_overbooking,
            wait_for_confirmation: option.wait_for_confirmation,
            disable_booking: option.disable_booking,
            course_start_time: option.course_start_time,
            course_end_time: option.course_end_time,
            created_at: option.created_at,
        }
    }
}

/// Paginated option list
#[derive(Debug, Serialize)]
pub struct OptionsListResponse {
    pub options: Vec<OptionResponse>,
    pub page: u32,
    pub per_page: u32,
}

/// Availability evaluation response
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    /// Whether a booking would commit right now
    pub bookable: bool,
    /// Verdict of the first blocking condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking: Option<Verdict>,
    /// Every condition's verdict (full view only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdicts: Option<Vec<Verdict>>,
    /// Call-to-action of the first blocking condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<ButtonPayload>,
    /// Interstitial pages to show before booking
    pub pre_pages: Vec<PagePayload>,
}

/// Booking attempt response
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub status: String,
    pub message: String,
    pub answer_id: Uuid,
}
