//! The permission catalog.
//!
//! Permissions are opaque dotted keys (`"users.view"`, `"billing.edit"`)
//! grouped into categories. Category membership is display metadata only; it
//! carries no authorization semantics. The catalog is closed: a key that
//! does not parse is granted to no role.

use serde::{Deserialize, Serialize};

/// A fine-grained capability, independent of the role hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    // === Users ===
    /// View user accounts.
    #[serde(rename = "users.view")]
    UsersView,
    /// Edit user profile fields.
    #[serde(rename = "users.edit")]
    UsersEdit,
    /// Delete user accounts.
    #[serde(rename = "users.delete")]
    UsersDelete,
    /// Change a user's role.
    #[serde(rename = "users.change_role")]
    UsersChangeRole,

    // === Voice assistants ===
    /// View voice assistants.
    #[serde(rename = "assistants.view")]
    AssistantsView,
    /// Create voice assistants.
    #[serde(rename = "assistants.create")]
    AssistantsCreate,
    /// Edit assistant configuration.
    #[serde(rename = "assistants.edit")]
    AssistantsEdit,
    /// Delete voice assistants.
    #[serde(rename = "assistants.delete")]
    AssistantsDelete,

    // === Calls ===
    /// View call history and transcripts.
    #[serde(rename = "calls.view")]
    CallsView,
    /// Export call records.
    #[serde(rename = "calls.export")]
    CallsExport,

    // === Billing ===
    /// View invoices and subscription state.
    #[serde(rename = "billing.view")]
    BillingView,
    /// Change plans and payment methods.
    #[serde(rename = "billing.edit")]
    BillingEdit,
    /// Export billing records.
    #[serde(rename = "billing.export")]
    BillingExport,

    // === CRM ===
    /// View CRM contacts and leads.
    #[serde(rename = "crm.view")]
    CrmView,
    /// Edit CRM records.
    #[serde(rename = "crm.edit")]
    CrmEdit,
    /// Export CRM data.
    #[serde(rename = "crm.export")]
    CrmExport,

    // === Content ===
    /// View marketing content.
    #[serde(rename = "content.view")]
    ContentView,
    /// Edit marketing content.
    #[serde(rename = "content.edit")]
    ContentEdit,
    /// Publish marketing content.
    #[serde(rename = "content.publish")]
    ContentPublish,

    // === Settings ===
    /// View workspace settings.
    #[serde(rename = "settings.view")]
    SettingsView,
    /// Change workspace settings.
    #[serde(rename = "settings.edit")]
    SettingsEdit,

    // === System ===
    /// View the platform audit log.
    #[serde(rename = "system.audit")]
    SystemAudit,
    /// Impersonate another user.
    #[serde(rename = "system.impersonate")]
    SystemImpersonate,
    /// Access debug tooling.
    #[serde(rename = "system.debug")]
    SystemDebug,
}

/// Display grouping for the permission catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    Users,
    Assistants,
    Calls,
    Billing,
    Crm,
    Content,
    Settings,
    System,
}

impl PermissionCategory {
    /// Human-readable category label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Users => "User management",
            Self::Assistants => "Voice assistants",
            Self::Calls => "Calls",
            Self::Billing => "Billing",
            Self::Crm => "CRM",
            Self::Content => "Content",
            Self::Settings => "Settings",
            Self::System => "System",
        }
    }

    /// All categories, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Users,
            Self::Assistants,
            Self::Calls,
            Self::Billing,
            Self::Crm,
            Self::Content,
            Self::Settings,
            Self::System,
        ]
    }
}

impl Permission {
    /// Returns the dotted key for this permission.
    ///
    /// These keys are the wire form used in API payloads and audit log
    /// entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use av_access::Permission;
    ///
    /// assert_eq!(Permission::BillingEdit.key(), "billing.edit");
    /// ```
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::UsersView => "users.view",
            Self::UsersEdit => "users.edit",
            Self::UsersDelete => "users.delete",
            Self::UsersChangeRole => "users.change_role",
            Self::AssistantsView => "assistants.view",
            Self::AssistantsCreate => "assistants.create",
            Self::AssistantsEdit => "assistants.edit",
            Self::AssistantsDelete => "assistants.delete",
            Self::CallsView => "calls.view",
            Self::CallsExport => "calls.export",
            Self::BillingView => "billing.view",
            Self::BillingEdit => "billing.edit",
            Self::BillingExport => "billing.export",
            Self::CrmView => "crm.view",
            Self::CrmEdit => "crm.edit",
            Self::CrmExport => "crm.export",
            Self::ContentView => "content.view",
            Self::ContentEdit => "content.edit",
            Self::ContentPublish => "content.publish",
            Self::SettingsView => "settings.view",
            Self::SettingsEdit => "settings.edit",
            Self::SystemAudit => "system.audit",
            Self::SystemImpersonate => "system.impersonate",
            Self::SystemDebug => "system.debug",
        }
    }

    /// Returns the display category for this permission.
    #[must_use]
    pub const fn category(self) -> PermissionCategory {
        match self {
            Self::UsersView | Self::UsersEdit | Self::UsersDelete | Self::UsersChangeRole => {
                PermissionCategory::Users
            }
            Self::AssistantsView
            | Self::AssistantsCreate
            | Self::AssistantsEdit
            | Self::AssistantsDelete => PermissionCategory::Assistants,
            Self::CallsView | Self::CallsExport => PermissionCategory::Calls,
            Self::BillingView | Self::BillingEdit | Self::BillingExport => {
                PermissionCategory::Billing
            }
            Self::CrmView | Self::CrmEdit | Self::CrmExport => PermissionCategory::Crm,
            Self::ContentView | Self::ContentEdit | Self::ContentPublish => {
                PermissionCategory::Content
            }
            Self::SettingsView | Self::SettingsEdit => PermissionCategory::Settings,
            Self::SystemAudit | Self::SystemImpersonate | Self::SystemDebug => {
                PermissionCategory::System
            }
        }
    }

    /// Returns a human-readable description of the permission.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UsersView => "View user accounts",
            Self::UsersEdit => "Edit user profiles",
            Self::UsersDelete => "Delete user accounts",
            Self::UsersChangeRole => "Change user roles",
            Self::AssistantsView => "View voice assistants",
            Self::AssistantsCreate => "Create voice assistants",
            Self::AssistantsEdit => "Edit assistant configuration",
            Self::AssistantsDelete => "Delete voice assistants",
            Self::CallsView => "View call history",
            Self::CallsExport => "Export call records",
            Self::BillingView => "View invoices and subscriptions",
            Self::BillingEdit => "Change plans and payment methods",
            Self::BillingExport => "Export billing records",
            Self::CrmView => "View contacts and leads",
            Self::CrmEdit => "Edit CRM records",
            Self::CrmExport => "Export CRM data",
            Self::ContentView => "View marketing content",
            Self::ContentEdit => "Edit marketing content",
            Self::ContentPublish => "Publish marketing content",
            Self::SettingsView => "View workspace settings",
            Self::SettingsEdit => "Change workspace settings",
            Self::SystemAudit => "View the platform audit log",
            Self::SystemImpersonate => "Impersonate another user",
            Self::SystemDebug => "Access debug tooling",
        }
    }

    /// Returns the full catalog as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::UsersView,
            Self::UsersEdit,
            Self::UsersDelete,
            Self::UsersChangeRole,
            Self::AssistantsView,
            Self::AssistantsCreate,
            Self::AssistantsEdit,
            Self::AssistantsDelete,
            Self::CallsView,
            Self::CallsExport,
            Self::BillingView,
            Self::BillingEdit,
            Self::BillingExport,
            Self::CrmView,
            Self::CrmEdit,
            Self::CrmExport,
            Self::ContentView,
            Self::ContentEdit,
            Self::ContentPublish,
            Self::SettingsView,
            Self::SettingsEdit,
            Self::SystemAudit,
            Self::SystemImpersonate,
            Self::SystemDebug,
        ]
    }

    /// Parse a dotted key into a catalog entry.
    ///
    /// Returns `None` for keys outside the catalog; checks against unknown
    /// keys must fail closed rather than raise.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.key() == key)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_category_namespaced() {
        for perm in Permission::all() {
            let (namespace, rest) = perm.key().split_once('.').expect("key must be dotted");
            assert!(!rest.is_empty());
            let category_json = serde_json::to_string(&perm.category()).unwrap();
            assert_eq!(category_json.trim_matches('"'), namespace);
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: Vec<&str> = Permission::all().iter().map(|p| p.key()).collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(
                !keys[i + 1..].contains(key),
                "duplicate permission key: {key}"
            );
        }
    }

    #[test]
    fn test_from_key_roundtrip() {
        for perm in Permission::all() {
            assert_eq!(Permission::from_key(perm.key()), Some(*perm));
        }
    }

    #[test]
    fn test_from_key_unknown() {
        assert_eq!(Permission::from_key("nonexistent.permission"), None);
        assert_eq!(Permission::from_key("users"), None);
        assert_eq!(Permission::from_key(""), None);
    }

    #[test]
    fn test_all_returns_full_catalog() {
        assert_eq!(Permission::all().len(), 24);
    }

    #[test]
    fn test_serde_uses_dotted_keys() {
        let json = serde_json::to_string(&Permission::CrmExport).unwrap();
        assert_eq!(json, "\"crm.export\"");
        let perm: Permission = serde_json::from_str("\"users.change_role\"").unwrap();
        assert_eq!(perm, Permission::UsersChangeRole);
    }

    #[test]
    fn test_serde_matches_key() {
        for perm in Permission::all() {
            let json = serde_json::to_string(perm).unwrap();
            assert_eq!(json, format!("\"{}\"", perm.key()));
        }
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in PermissionCategory::all() {
            assert!(
                Permission::all().iter().any(|p| p.category() == *category),
                "category {category:?} has no permissions"
            );
        }
    }

    #[test]
    fn test_descriptions_are_not_empty() {
        for perm in Permission::all() {
            assert!(!perm.description().is_empty());
        }
    }
}
