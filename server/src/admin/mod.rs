//! Back-office Admin Module
//!
//! Admin-only endpoints for platform management:
//! - User listing and details
//! - Role changes (audited)
//! - Permission catalog introspection
//! - Audit log
//!
//! Each route picks its guard explicitly: user management uses fixed
//! allow-lists, the audit log requires the `system.audit` permission key,
//! and role changes additionally run the hierarchy-aware dominance check.
//! The guard styles are not interchangeable and are never unified.

pub mod handlers;
pub mod middleware;
pub mod types;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, put},
    Router,
};

use crate::api::AppState;
use crate::auth::require_auth;

pub use middleware::{require_roles, ADMIN_ROLES, STAFF_ROLES};
pub use types::AdminError;

/// Create the admin router.
///
/// All routes require authentication. User management additionally
/// requires an admin role, the permission catalog is open to marketing
/// staff, the audit log needs the `system.audit` permission, and
/// `/status` is accessible to any authenticated user.
pub fn router(state: AppState) -> Router<AppState> {
    // Admin-only routes
    let admin_routes = Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/{id}", get(handlers::get_user_details))
        .route("/users/{id}/role", put(handlers::change_user_role))
        .layer(from_fn(require_roles(ADMIN_ROLES)));

    // Staff routes (marketing included)
    let staff_routes = Router::new()
        .route("/permissions", get(handlers::list_permissions))
        .layer(from_fn(require_roles(STAFF_ROLES)));

    // Permission-gated rather than allow-listed: the handler requires the
    // system.audit key
    let audit_route = Router::new().route("/audit-log", get(handlers::get_audit_log));

    // Any authenticated user can check their own access
    let status_route = Router::new().route("/status", get(handlers::get_status));

    admin_routes
        .merge(staff_routes)
        .merge(audit_route)
        .merge(status_route)
        .layer(from_fn_with_state(state, require_auth))
}
