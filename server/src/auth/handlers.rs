//! Authentication HTTP Handlers

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use av_access::{permissions_for, Role};

use super::error::{AuthError, AuthResult};
use super::jwt::{generate_token_pair, validate_refresh_token};
use super::middleware::AuthUser;
use super::password::{hash_password, verify_password};
use crate::api::AppState;
use crate::db::{create_user, email_exists, find_user_by_email, find_user_by_id};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Password (8-128 characters).
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Token refresh request.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Authentication response with tokens.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Access token expiry in seconds.
    pub expires_in: i64,
    /// Token type (always "Bearer").
    pub token_type: String,
}

/// User profile response.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    /// User ID.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Permission keys granted by the role.
    pub permissions: Vec<&'static str>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a new user.
///
/// `POST /api/auth/register`
///
/// New accounts always start on the free tier; only the admin API changes
/// roles.
#[tracing::instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AuthResult<Json<AuthResponse>> {
    body.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    // UNIQUE constraint still catches races; this check just gives a clean
    // error for the common case.
    if email_exists(&state.db, &body.email).await? {
        return Err(AuthError::UserAlreadyExists);
    }

    let password_hash = hash_password(&body.password).map_err(|_| AuthError::PasswordHash)?;

    let user = create_user(&state.db, &body.email, &body.name, &password_hash).await?;

    tracing::info!(user_id = %user.id, "User registered");

    let tokens = generate_token_pair(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_access_expiry,
        state.config.jwt_refresh_expiry,
    )?;

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.access_expires_in,
        token_type: "Bearer".to_string(),
    }))
}

/// Login with email and password.
///
/// `POST /api/auth/login`
#[tracing::instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>> {
    // Same error for unknown email and wrong password
    let user = find_user_by_email(&state.db, &body.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password_hash = user
        .password_hash
        .as_ref()
        .ok_or(AuthError::InvalidCredentials)?;

    let valid =
        verify_password(&body.password, password_hash).map_err(|_| AuthError::PasswordHash)?;

    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    let tokens = generate_token_pair(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_access_expiry,
        state.config.jwt_refresh_expiry,
    )?;

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.access_expires_in,
        token_type: "Bearer".to_string(),
    }))
}

/// Exchange a refresh token for a new token pair.
///
/// `POST /api/auth/refresh`
#[tracing::instrument(skip(state, body))]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AuthResult<Json<AuthResponse>> {
    let claims = validate_refresh_token(&body.refresh_token, &state.config.jwt_secret)?;

    let user_id: uuid::Uuid = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

    // Confirm the account still exists before minting new tokens
    let user = find_user_by_id(&state.db, user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let tokens = generate_token_pair(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_access_expiry,
        state.config.jwt_refresh_expiry,
    )?;

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.access_expires_in,
        token_type: "Bearer".to_string(),
    }))
}

/// Get the current user's profile.
///
/// `GET /api/auth/me`
#[tracing::instrument(skip_all, fields(user_id = %auth.id))]
pub async fn get_profile(auth: AuthUser) -> Json<UserProfile> {
    let permissions = permissions_for(auth.role)
        .iter()
        .map(|p| p.key())
        .collect();

    Json(UserProfile {
        id: auth.id.to_string(),
        email: auth.email,
        name: auth.name,
        role: auth.role,
        permissions,
    })
}
