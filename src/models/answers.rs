//! Booking answers
//!
//! A booking answer is one user's claim on an option: a booked place, a
//! waiting-list entry, or a short-lived reservation. `BookingAnswers` is the
//! point-in-time snapshot the availability chain reads; it is rebuilt from
//! the persisted rows on every evaluation and never cached by the chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a single booking answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Booked,
    Waiting,
    Reserved,
    Deleted,
}

impl AnswerStatus {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Booked => 0,
            Self::Waiting => 1,
            Self::Reserved => 2,
            Self::Deleted => 3,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Booked),
            1 => Some(Self::Waiting),
            2 => Some(Self::Reserved),
            3 => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// Booking answer database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingAnswer {
    pub id: Uuid,
    pub option_id: Uuid,
    pub user_id: Uuid,
    pub status: i16,
    /// Number of places this answer claims (group bookings claim several)
    pub places: i32,
    pub created_at: DateTime<Utc>,
}

impl BookingAnswer {
    pub fn answer_status(&self) -> Option<AnswerStatus> {
        AnswerStatus::from_i16(self.status)
    }
}

/// One claimed slot inside a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceClaim {
    pub user_id: Uuid,
    pub places: i32,
}

/// Point-in-time booking state for one option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingAnswers {
    pub option_id: Uuid,
    pub max_answers: i32,
    pub max_overbooking: i32,
    booked: Vec<PlaceClaim>,
    waiting: Vec<PlaceClaim>,
    reserved: Vec<PlaceClaim>,
}

impl BookingAnswers {
    /// Build the snapshot from persisted rows. Deleted answers are dropped.
    pub fn from_rows(
        option_id: Uuid,
        max_answers: i32,
        max_overbooking: i32,
        rows: &[BookingAnswer],
    ) -> Self {
        let mut snapshot = Self {
            option_id,
            max_answers,
            max_overbooking,
            ..Default::default()
        };
        for row in rows.iter().filter(|r| r.option_id == option_id) {
            let claim = PlaceClaim {
                user_id: row.user_id,
                places: row.places,
            };
            match row.answer_status() {
                Some(AnswerStatus::Booked) => snapshot.booked.push(claim),
                Some(AnswerStatus::Waiting) => snapshot.waiting.push(claim),
                Some(AnswerStatus::Reserved) => snapshot.reserved.push(claim),
                _ => {}
            }
        }
        snapshot
    }

    /// Sum of places over a claim list. Counts places, not rows: a group
    /// booking claiming 3 places occupies 3 places.
    pub fn count_places(claims: &[PlaceClaim]) -> i32 {
        claims.iter().map(|c| c.places).sum()
    }

    pub fn booked_places(&self) -> i32 {
        Self::count_places(&self.booked)
    }

    pub fn waitlist_places(&self) -> i32 {
        Self::count_places(&self.waiting)
    }

    /// All regular places taken. Capacity 0 means unlimited.
    pub fn fully_booked(&self) -> bool {
        self.max_answers > 0 && self.booked_places() >= self.max_answers
    }

    /// All waiting-list places taken too.
    pub fn waitlist_full(&self) -> bool {
        self.waitlist_places() >= self.max_overbooking
    }

    pub fn status_of(&self, user_id: Uuid) -> Option<AnswerStatus> {
        if self.booked.iter().any(|c| c.user_id == user_id) {
            Some(AnswerStatus::Booked)
        } else if self.waiting.iter().any(|c| c.user_id == user_id) {
            Some(AnswerStatus::Waiting)
        } else if self.reserved.iter().any(|c| c.user_id == user_id) {
            Some(AnswerStatus::Reserved)
        } else {
            None
        }
    }

    pub fn is_booked(&self, user_id: Uuid) -> bool {
        self.status_of(user_id) == Some(AnswerStatus::Booked)
    }

    pub fn on_waitlist(&self, user_id: Uuid) -> bool {
        self.status_of(user_id) == Some(AnswerStatus::Waiting)
    }
}
