//! Authentication service
//!
//! JWT-based sessions. Guests get short-lived tokens with the guest role and
//! no user row; everyone else authenticates against the users table.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    availability::{SessionState, SessionUser},
    config::JwtConfig,
    constants::{roles, GUEST_SESSION_EXPIRY_HOURS},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::crypto::{hash_password, verify_password},
    utils::validation::{validate_password, validate_role, validate_username},
};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user
    pub async fn register(
        pool: &PgPool,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> AppResult<User> {
        validate_username(username).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_password(password).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_role(role).map_err(|e| AppError::Validation(e.to_string()))?;
        if role == roles::GUEST {
            return Err(AppError::Validation(
                "Guest sessions are issued, not registered".to_string(),
            ));
        }

        if UserRepository::find_by_username(pool, username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = UserRepository::create(pool, username, email, &password_hash, role).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Log a user in, returning the token and the user
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtConfig,
        username: &str,
        password: &str,
    ) -> AppResult<(String, User)> {
        let user = UserRepository::find_by_username(pool, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let token = Self::create_token(jwt, &user.id.to_string(), &user.username, &user.role)?;
        Ok((token, user))
    }

    /// Issue a guest session token. Guests can browse but not book.
    pub fn guest_token(jwt: &JwtConfig) -> AppResult<String> {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "guest".to_string(),
            role: roles::GUEST.to_string(),
            exp: (Utc::now() + Duration::hours(GUEST_SESSION_EXPIRY_HOURS)).timestamp(),
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )?)
    }

    /// Create a signed token for a user
    pub fn create_token(
        jwt: &JwtConfig,
        sub: &str,
        username: &str,
        role: &str,
    ) -> AppResult<String> {
        let claims = Claims {
            sub: sub.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            exp: (Utc::now() + Duration::hours(jwt.expiry_hours)).timestamp(),
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )?)
    }

    /// Verify a token and return its claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    /// Session state carried by a set of verified claims
    pub fn session_from_claims(claims: &Claims) -> AppResult<SessionState> {
        if claims.role == roles::GUEST {
            return Ok(SessionState::Guest);
        }
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
        Ok(SessionState::Authenticated(SessionUser {
            id,
            username: claims.username.clone(),
            role: claims.role.clone(),
        }))
    }
}
