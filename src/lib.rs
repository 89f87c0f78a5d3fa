//! Coursebook - Course Booking Backend
//!
//! This library provides the core functionality for the Coursebook platform,
//! a course booking backend built around a rule-based availability engine
//! for bookable options.
//!
//! # Features
//!
//! - Chain-of-responsibility availability evaluation (login, waitlist,
//!   confirmation, cohorts, pricing, capacity)
//! - Booking flow with confirmation funnel and waiting lists
//! - Shortcode-driven bulk administration tables
//! - Role-based capabilities and JWT sessions (including guests)
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//! - **Availability**: the synchronous condition chain evaluated over
//!   per-request snapshots

pub mod availability;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod lang;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod shortcodes;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
