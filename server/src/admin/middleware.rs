//! Admin authorization middleware.
//!
//! Fixed allow-list guards. These deliberately check list membership only:
//! a role outside the list is rejected even if it dominates a listed role
//! in the hierarchy.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use av_access::{is_allowed_role, Role};

use super::types::AdminError;
use crate::auth::AuthUser;

/// Roles accepted by the core admin endpoints.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::GodMode];

/// Roles accepted by staff endpoints (permission catalog).
pub const STAFF_ROLES: &[Role] = &[Role::Admin, Role::GodMode, Role::Marketing];

/// Middleware factory requiring the caller's role to be in `allowed`.
///
/// An absent `AuthUser` (route mounted without `require_auth`, or an
/// unauthenticated caller) fails closed.
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/users", get(handlers::list_users))
///     .layer(from_fn(require_roles(ADMIN_ROLES)))
///     .layer(from_fn_with_state(state, require_auth));
/// ```
pub fn require_roles(
    allowed: &'static [Role],
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
       + Clone
       + Send
       + 'static {
    move |request: Request, next: Next| {
        Box::pin(async move {
            let role = request.extensions().get::<AuthUser>().map(|u| u.role);

            if is_allowed_role(role, allowed) {
                next.run(request).await
            } else {
                AdminError::Forbidden.into_response()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_lists_are_distinct() {
        assert!(!ADMIN_ROLES.contains(&Role::Marketing));
        assert!(STAFF_ROLES.contains(&Role::Marketing));
        for role in ADMIN_ROLES {
            assert!(STAFF_ROLES.contains(role));
        }
    }

    #[test]
    fn test_admin_list_excludes_subscription_tiers() {
        for role in [
            Role::Free,
            Role::Essential,
            Role::Pro,
            Role::Enterprise,
            Role::Custom,
        ] {
            assert!(!is_allowed_role(Some(role), ADMIN_ROLES));
            assert!(!is_allowed_role(Some(role), STAFF_ROLES));
        }
    }
}
