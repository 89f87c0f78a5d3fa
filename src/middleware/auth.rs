//! Session middleware
//!
//! Derives the request's [`SessionState`] from the Authorization header and
//! stores it as an extension: no header means an anonymous session, a guest
//! token a guest session, a user token an authenticated one. Malformed or
//! expired tokens are rejected rather than silently downgraded.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    availability::{SessionState, SessionUser},
    error::AppError,
    services::AuthService,
    state::AppState,
};

/// Extractor for the request's session state; never fails.
pub struct CurrentSession(pub SessionState);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(
            parts
                .extensions
                .get::<SessionState>()
                .cloned()
                .unwrap_or(SessionState::Anonymous),
        ))
    }
}

/// Extractor requiring an authenticated non-guest user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl From<SessionUser> for AuthenticatedUser {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<SessionState>() {
            Some(SessionState::Authenticated(user)) => Ok(user.clone().into()),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Session middleware: resolves the Authorization header once per request.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let session = match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        None => SessionState::Anonymous,
        Some(header) => {
            let token = header
                .strip_prefix("Bearer ")
                .ok_or(AppError::Unauthorized)?;
            let claims = AuthService::verify_token(token, &state.config().jwt.secret)
                .inspect_err(|e| debug!(path = %path, error = ?e, "Token verification failed"))?;
            AuthService::session_from_claims(&claims)?
        }
    };

    debug!(path = %path, authenticated = matches!(session, SessionState::Authenticated(_)), "Session resolved");
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
