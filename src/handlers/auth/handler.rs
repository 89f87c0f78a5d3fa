//! Auth handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    constants::roles,
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    session::SessionStore,
    state::AppState,
};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::{AuthResponse, MeResponse, UserResponse},
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    let role = payload.role.as_deref().unwrap_or(roles::STUDENT);
    let user = AuthService::register(
        state.db(),
        &payload.username,
        &payload.email,
        &payload.password,
        role,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Log in and receive a token. If the client stashed a return URL before
/// authenticating (e.g. via a blocked booking attempt), it is handed back
/// here and cleared.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (token, user) = AuthService::login(
        state.db(),
        &state.config().jwt,
        &payload.username,
        &payload.password,
    )
    .await?;

    let redirect_url = match payload.session_key.as_deref() {
        Some(session_key) => state.session_store().take_wants_url(session_key).await?,
        None => None,
    };

    Ok(Json(AuthResponse {
        token,
        user: Some(user.into()),
        redirect_url,
    }))
}

/// Issue a guest session token
pub async fn guest_session(State(state): State<AppState>) -> AppResult<Json<AuthResponse>> {
    let token = AuthService::guest_token(&state.config().jwt)?;
    Ok(Json(AuthResponse {
        token,
        user: None,
        redirect_url: None,
    }))
}

/// Current authenticated user
pub async fn me(user: AuthenticatedUser) -> AppResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}
