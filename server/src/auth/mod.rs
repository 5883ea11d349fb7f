//! Authentication Service
//!
//! Local email/password authentication and JWT session management.

mod error;
mod handlers;
pub mod jwt;
mod middleware;
mod password;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::api::AppState;

pub use error::{AuthError, AuthResult};
pub use middleware::{require_auth, AuthUser};

/// Create authentication router.
///
/// Public routes (no auth required):
/// - POST /register - Register a new user
/// - POST /login - Login with email/password
/// - POST /refresh - Refresh access token
///
/// Protected routes (auth required):
/// - GET /me - Get current user profile
pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh_token));

    let protected_routes = Router::new()
        .route("/me", get(handlers::get_profile))
        .layer(axum_middleware::from_fn_with_state(state, require_auth));

    public_routes.merge(protected_routes)
}
