//! Booking option handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

/// Option routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // Option CRUD
        .route("/", get(handler::list_options))
        .route("/", post(handler::create_option))
        .route("/{id}", get(handler::get_option))
        .route("/{id}", put(handler::update_option))
        .route("/{id}", delete(handler::delete_option))
        // Availability and booking
        .route("/{id}/availability", get(handler::availability))
        .route("/{id}/book", post(handler::book))
}
