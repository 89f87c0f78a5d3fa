//! Built-in availability conditions.
//!
//! One rule per module, registered in `ConditionRegistry::builtin`. Each
//! rule is a stateless unit object; per-option configuration (cohorts,
//! prices, flags) lives in the settings view, never on the rule itself.

pub mod already_booked;
pub mod ask_for_confirmation;
pub mod book_it;
pub mod booking_disabled;
pub mod enrolled_in_cohorts;
pub mod fully_booked;
pub mod is_logged_in;
pub mod on_waitlist;
pub mod price_is_set;

pub use already_booked::AlreadyBooked;
pub use ask_for_confirmation::AskForConfirmation;
pub use book_it::BookIt;
pub use booking_disabled::BookingDisabled;
pub use enrolled_in_cohorts::EnrolledInCohorts;
pub use fully_booked::FullyBooked;
pub use is_logged_in::IsLoggedIn;
pub use on_waitlist::OnWaitlist;
pub use price_is_set::PriceIsSet;
