//! Authorization predicates.
//!
//! Pure functions over the static role/permission tables. All failures are
//! values (`false` or an [`AccessError`] carrying the unmet requirement);
//! nothing here panics or performs I/O. The HTTP layer translates denials
//! into 401/403 responses.

use thiserror::Error;

use crate::grants::has_permission;
use crate::hierarchy::includes;
use crate::role::Role;

/// Why an authorization check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Only `god_mode` may grant `god_mode`.
    #[error("only god_mode may grant god_mode")]
    GodModeRequired,

    /// The actor's role does not include the required role.
    #[error("role {actor} does not include role {required}")]
    RoleHierarchy {
        /// The caller's role.
        actor: Role,
        /// The role the caller must dominate.
        required: Role,
    },

    /// The role lacks the named permission (or the key is unknown).
    #[error("missing permission: {0}")]
    MissingPermission(String),
}

/// Check whether `actor` may change a user's role from `current` to
/// `new_role`.
///
/// Rules:
/// 1. `god_mode` actors may do anything.
/// 2. Nobody else may grant `god_mode`.
/// 3. Otherwise the actor must dominate the target's *current* role.
///
/// Pure predicate: persisting the change and writing the audit entry are
/// the caller's responsibility.
pub fn check_role_change(actor: Role, current: Role, new_role: Role) -> Result<(), AccessError> {
    if actor == Role::GodMode {
        return Ok(());
    }

    if new_role == Role::GodMode {
        return Err(AccessError::GodModeRequired);
    }

    // TODO: decide whether `new_role` should also require dominance. Today
    // only the god_mode grant is gated, so an actor that dominates a free
    // target may assign that target a role the actor itself does not
    // dominate (e.g. pro promoting free straight to admin).
    if !includes(actor, current) {
        return Err(AccessError::RoleHierarchy {
            actor,
            required: current,
        });
    }

    Ok(())
}

/// Boolean form of [`check_role_change`].
#[must_use]
pub fn can_change_role(actor: Role, current: Role, new_role: Role) -> bool {
    check_role_change(actor, current, new_role).is_ok()
}

/// Whether the caller's role is one of an explicit fixed allow-list.
///
/// Deliberately *not* hierarchy-aware: endpoints that use this guard name
/// the exact roles they accept. A missing role (unauthenticated caller)
/// always yields `false`.
///
/// # Examples
///
/// ```
/// use av_access::{is_allowed_role, Role};
///
/// const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::GodMode];
///
/// assert!(is_allowed_role(Some(Role::Admin), ADMIN_ROLES));
/// assert!(!is_allowed_role(Some(Role::Enterprise), ADMIN_ROLES));
/// assert!(!is_allowed_role(None, ADMIN_ROLES));
/// ```
#[must_use]
pub fn is_allowed_role(role: Option<Role>, allowed: &[Role]) -> bool {
    role.is_some_and(|r| allowed.contains(&r))
}

/// Require that `role` holds the permission named by `key`.
///
/// Unknown keys fail closed with [`AccessError::MissingPermission`], never
/// a panic.
pub fn require_permission(role: Role, key: &str) -> Result<(), AccessError> {
    if has_permission(role, key) {
        Ok(())
    } else {
        Err(AccessError::MissingPermission(key.to_string()))
    }
}
