//! Per-role permission grants.
//!
//! Each role's set is enumerated independently rather than computed from
//! the hierarchy closure. In the shipped data higher roles happen to be
//! supersets of the roles they dominate, and `GodMode` holds the entire
//! catalog; both are asserted by tests, not assumed by code.

use crate::permission::Permission;
use crate::role::Role;

const FREE_GRANTS: &[Permission] = &[
    Permission::UsersView,
    Permission::AssistantsView,
    Permission::CallsView,
];

const ESSENTIAL_GRANTS: &[Permission] = &[
    Permission::UsersView,
    Permission::AssistantsView,
    Permission::AssistantsCreate,
    Permission::CallsView,
    Permission::CallsExport,
    Permission::BillingView,
];

const PRO_GRANTS: &[Permission] = &[
    Permission::UsersView,
    Permission::AssistantsView,
    Permission::AssistantsCreate,
    Permission::AssistantsEdit,
    Permission::CallsView,
    Permission::CallsExport,
    Permission::BillingView,
    Permission::CrmView,
    Permission::ContentView,
];

const ENTERPRISE_GRANTS: &[Permission] = &[
    Permission::UsersView,
    Permission::AssistantsView,
    Permission::AssistantsCreate,
    Permission::AssistantsEdit,
    Permission::AssistantsDelete,
    Permission::CallsView,
    Permission::CallsExport,
    Permission::BillingView,
    Permission::BillingEdit,
    Permission::CrmView,
    Permission::CrmEdit,
    Permission::CrmExport,
    Permission::ContentView,
];

const CUSTOM_GRANTS: &[Permission] = &[
    Permission::UsersView,
    Permission::AssistantsView,
    Permission::AssistantsCreate,
    Permission::AssistantsEdit,
    Permission::AssistantsDelete,
    Permission::CallsView,
    Permission::CallsExport,
    Permission::BillingView,
    Permission::BillingEdit,
    Permission::CrmView,
    Permission::CrmEdit,
    Permission::CrmExport,
    Permission::ContentView,
    Permission::ContentEdit,
    Permission::SettingsView,
];

const MARKETING_GRANTS: &[Permission] = &[
    Permission::UsersView,
    Permission::AssistantsView,
    Permission::AssistantsCreate,
    Permission::AssistantsEdit,
    Permission::AssistantsDelete,
    Permission::CallsView,
    Permission::CallsExport,
    Permission::BillingView,
    Permission::BillingEdit,
    Permission::CrmView,
    Permission::CrmEdit,
    Permission::CrmExport,
    Permission::ContentView,
    Permission::ContentEdit,
    Permission::ContentPublish,
];

const ADMIN_GRANTS: &[Permission] = &[
    Permission::UsersView,
    Permission::UsersEdit,
    Permission::UsersDelete,
    Permission::UsersChangeRole,
    Permission::AssistantsView,
    Permission::AssistantsCreate,
    Permission::AssistantsEdit,
    Permission::AssistantsDelete,
    Permission::CallsView,
    Permission::CallsExport,
    Permission::BillingView,
    Permission::BillingEdit,
    Permission::BillingExport,
    Permission::CrmView,
    Permission::CrmEdit,
    Permission::CrmExport,
    Permission::ContentView,
    Permission::ContentEdit,
    Permission::ContentPublish,
    Permission::SettingsView,
    Permission::SettingsEdit,
    Permission::SystemAudit,
    Permission::SystemImpersonate,
];

/// Returns the permissions explicitly granted to `role`.
///
/// `GodMode` holds the full catalog.
#[must_use]
pub const fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Free => FREE_GRANTS,
        Role::Essential => ESSENTIAL_GRANTS,
        Role::Pro => PRO_GRANTS,
        Role::Enterprise => ENTERPRISE_GRANTS,
        Role::Custom => CUSTOM_GRANTS,
        Role::Marketing => MARKETING_GRANTS,
        Role::Admin => ADMIN_GRANTS,
        Role::GodMode => Permission::all(),
    }
}

/// Whether `role` holds the given catalog permission.
#[must_use]
pub fn holds(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Whether `role` holds the permission named by `key`.
///
/// Keys outside the catalog are granted to no role: the check fails closed
/// instead of raising.
///
/// # Examples
///
/// ```
/// use av_access::{has_permission, Role};
///
/// assert!(has_permission(Role::Free, "users.view"));
/// assert!(!has_permission(Role::Free, "billing.edit"));
/// assert!(!has_permission(Role::GodMode, "nonexistent.permission"));
/// ```
#[must_use]
pub fn has_permission(role: Role, key: &str) -> bool {
    Permission::from_key(key).is_some_and(|p| holds(role, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_grants() {
        assert!(has_permission(Role::Free, "users.view"));
        assert!(!has_permission(Role::Free, "billing.edit"));
        assert!(!has_permission(Role::Free, "users.change_role"));
    }

    #[test]
    fn test_unknown_key_fails_closed_for_every_role() {
        for role in Role::all() {
            assert!(!has_permission(*role, "nonexistent.permission"));
            assert!(!has_permission(*role, ""));
        }
    }

    #[test]
    fn test_god_mode_holds_entire_catalog() {
        for perm in Permission::all() {
            assert!(holds(Role::GodMode, *perm));
        }
        assert_eq!(permissions_for(Role::GodMode).len(), Permission::all().len());
    }

    #[test]
    fn test_catalog_is_union_of_role_grants() {
        // Every catalog entry is reachable through at least one role.
        for perm in Permission::all() {
            assert!(
                Role::all().iter().any(|r| holds(*r, *perm)),
                "{perm} granted to no role"
            );
        }
    }

    #[test]
    fn test_no_duplicate_grants() {
        for role in Role::all() {
            let grants = permissions_for(*role);
            for (i, p) in grants.iter().enumerate() {
                assert!(
                    !grants[i + 1..].contains(p),
                    "{role} lists {p} twice"
                );
            }
        }
    }

    #[test]
    fn test_dominating_roles_are_supersets() {
        // Observed property of the data: if a dominates b, a's grants
        // contain b's.
        use crate::hierarchy::subordinates;
        for role in Role::all() {
            for sub in subordinates(*role) {
                for perm in permissions_for(*sub) {
                    assert!(
                        holds(*role, *perm),
                        "{role} dominates {sub} but lacks {perm}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_system_debug_is_god_mode_only() {
        for role in Role::all() {
            let expected = *role == Role::GodMode;
            assert_eq!(holds(*role, Permission::SystemDebug), expected);
        }
    }

    #[test]
    fn test_change_role_is_back_office_only() {
        for role in [Role::Free, Role::Essential, Role::Pro, Role::Enterprise, Role::Custom, Role::Marketing] {
            assert!(!holds(role, Permission::UsersChangeRole));
        }
        assert!(holds(Role::Admin, Permission::UsersChangeRole));
        assert!(holds(Role::GodMode, Permission::UsersChangeRole));
    }

    #[test]
    fn test_marketing_can_publish_custom_cannot() {
        assert!(holds(Role::Marketing, Permission::ContentPublish));
        assert!(!holds(Role::Custom, Permission::ContentPublish));
        assert!(holds(Role::Custom, Permission::SettingsView));
        assert!(!holds(Role::Marketing, Permission::SettingsView));
    }
}
