//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod options;
pub mod render;

use axum::{middleware, Router};

use crate::{middleware::auth::session_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest("/options", options::routes())
        .nest("/render", render::routes())
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}
