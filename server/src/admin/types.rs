//! Admin module types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use av_access::{AccessError, Role};

/// Admin API error type.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Caller's role is not in the endpoint's allow-list.
    #[error("Insufficient permissions")]
    Forbidden,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    /// Authorization check failed.
    #[error("Access denied: {0}")]
    Access(#[from] AccessError),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database"),
            Self::Access(_) => (StatusCode::FORBIDDEN, "access_denied"),
        };

        let body = serde_json::json!({
            "error": code,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of items to skip.
    #[serde(default)]
    pub offset: i64,
}

/// Audit log query parameters.
#[derive(Debug, Deserialize)]
pub struct AuditLogParams {
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of items to skip.
    #[serde(default)]
    pub offset: i64,
    /// Filter by action prefix (e.g., "admin." for all admin actions).
    pub action: Option<String>,
}

const fn default_limit() -> i64 {
    50
}

// ============================================================================
// Request Types
// ============================================================================

/// Role change request.
///
/// Deserializes through the closed [`Role`] enum, so unknown role names are
/// rejected at the boundary (422) before any authorization logic runs.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    /// The role to assign.
    pub role: Role,
}

// ============================================================================
// Response Types
// ============================================================================

/// Generic paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// User summary for admin listing.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Full user details for the admin view.
#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Roles the user's role subsumes.
    pub includes_roles: Vec<Role>,
    /// Permission keys granted by the role.
    pub permissions: Vec<&'static str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role change response.
#[derive(Debug, Serialize)]
pub struct RoleChangeResponse {
    pub id: Uuid,
    pub previous_role: Role,
    pub role: Role,
}

/// Access status for the current user.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub user_id: Uuid,
    pub role: Role,
    /// Whether the caller can reach the back-office at all.
    pub back_office: bool,
    /// Permission keys granted by the role.
    pub permissions: Vec<&'static str>,
}

/// One catalog entry in the permission listing.
#[derive(Debug, Serialize)]
pub struct PermissionEntry {
    pub key: &'static str,
    pub description: &'static str,
}

/// Permission catalog grouped for display.
#[derive(Debug, Serialize)]
pub struct PermissionCategoryGroup {
    pub category: av_access::PermissionCategory,
    pub label: &'static str,
    pub permissions: Vec<PermissionEntry>,
}
