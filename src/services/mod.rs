//! Business logic services

pub mod auth_service;
pub mod availability_service;
pub mod booking_service;
pub mod option_service;

pub use auth_service::AuthService;
pub use availability_service::AvailabilityService;
pub use booking_service::{BookOutcome, BookingService};
pub use option_service::OptionService;
