//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{session_middleware, AuthenticatedUser, CurrentSession};
pub use logging::logging_middleware;
