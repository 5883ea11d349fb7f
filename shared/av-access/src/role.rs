//! Account roles.
//!
//! A user holds exactly one role at a time. The set is closed: values
//! outside the enumeration are rejected when parsing, not deep inside
//! authorization logic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Privilege level assigned to a user account.
///
/// Subscription tiers (`Free` through `Enterprise`) form a chain; `Custom`
/// and `Marketing` sit above `Enterprise` as siblings; `Admin` and `GodMode`
/// are back-office roles. See [`crate::hierarchy`] for the dominance
/// relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Entry tier, assigned at registration.
    #[default]
    Free,
    /// Paid starter tier.
    Essential,
    /// Mid tier.
    Pro,
    /// Top subscription tier.
    Enterprise,
    /// Bespoke contract accounts.
    Custom,
    /// Marketing staff (content and CRM access).
    Marketing,
    /// Platform administrators.
    Admin,
    /// Unrestricted superuser.
    GodMode,
}

impl Role {
    /// Returns the wire/storage name of the role.
    ///
    /// This is the exact string stored in the `users.role` column and used
    /// in JSON payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Essential => "essential",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
            Self::Custom => "custom",
            Self::Marketing => "marketing",
            Self::Admin => "admin",
            Self::GodMode => "god_mode",
        }
    }

    /// Returns all roles as a slice.
    ///
    /// Useful for iteration and validation.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Free,
            Self::Essential,
            Self::Pro,
            Self::Enterprise,
            Self::Custom,
            Self::Marketing,
            Self::Admin,
            Self::GodMode,
        ]
    }

    /// Whether this role is a back-office role rather than a subscription
    /// tier.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Marketing | Self::Admin | Self::GodMode)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "essential" => Ok(Self::Essential),
            "pro" => Ok(Self::Pro),
            "enterprise" => Ok(Self::Enterprise),
            "custom" => Ok(Self::Custom),
            "marketing" => Ok(Self::Marketing),
            "admin" => Ok(Self::Admin),
            "god_mode" => Ok(Self::GodMode),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

// Used by sqlx `#[sqlx(try_from = "String")]` on the user model.
impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_roundtrip() {
        for role in Role::all() {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, *role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, RoleParseError("superuser".to_string()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        // Storage and wire forms are lowercase; anything else is rejected.
        assert!("FREE".parse::<Role>().is_err());
        assert!("GodMode".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_is_free() {
        assert_eq!(Role::default(), Role::Free);
    }

    #[test]
    fn test_all_roles_unique() {
        let all = Role::all();
        assert_eq!(all.len(), 8);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_staff_roles() {
        assert!(Role::Marketing.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(Role::GodMode.is_staff());
        assert!(!Role::Enterprise.is_staff());
        assert!(!Role::Custom.is_staff());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::GodMode).unwrap(), "\"god_mode\"");
        let role: Role = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(role, Role::Enterprise);
    }

    #[test]
    fn test_serde_rejects_unknown() {
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for role in Role::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}
