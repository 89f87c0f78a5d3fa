//! Content rendering handlers
//!
//! Processes user-authored content server-side, replacing shortcode markers
//! with their rendered markup.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::CurrentSession,
    services::AvailabilityService,
    shortcodes::{self, ShortcodeEnv},
    state::AppState,
};

/// Shortcode rendering request
#[derive(Debug, Deserialize, Validate)]
pub struct RenderRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

/// Shortcode rendering response
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
}

/// Replace shortcodes in the submitted content
pub async fn render_shortcodes(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<RenderRequest>,
) -> AppResult<Json<RenderResponse>> {
    payload.validate()?;

    let ctx = AvailabilityService::site_context(state.db(), session).await?;
    let catalog = state.option_catalog();
    let cache = state.table_cache();
    let env = ShortcodeEnv {
        ctx: &ctx,
        chain: state.chain(),
        catalog: &catalog,
        cache: &cache,
    };

    let html = shortcodes::process(&payload.content, &env).await?;
    Ok(Json(RenderResponse { html }))
}

/// Render routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/shortcodes", post(render_shortcodes))
}
