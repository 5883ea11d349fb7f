//! Admin API handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use av_access::{
    check_role_change, is_allowed_role, permissions_for, require_permission, subordinates,
    Permission, PermissionCategory,
};

use super::middleware::STAFF_ROLES;
use super::types::{
    AdminError, AuditLogParams, ChangeRoleRequest, PaginationParams, PaginatedResponse,
    PermissionCategoryGroup, PermissionEntry, RoleChangeResponse, StatusResponse, UserDetails,
    UserSummary,
};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::db::{
    count_users, find_user_by_id, get_audit_log as query_audit_log, list_users as query_users,
    update_user_role, write_audit_log, AuditLogEntry, User,
};

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserDetails {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            includes_roles: subordinates(user.role).to_vec(),
            permissions: permissions_for(user.role).iter().map(|p| p.key()).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Get access status for the current user.
///
/// `GET /api/admin/status`
///
/// Does NOT require an admin role - it reports whether the caller has one.
#[tracing::instrument(skip_all, fields(user_id = %auth.id))]
pub async fn get_status(auth: AuthUser) -> Json<StatusResponse> {
    Json(StatusResponse {
        user_id: auth.id,
        role: auth.role,
        back_office: is_allowed_role(Some(auth.role), STAFF_ROLES),
        permissions: permissions_for(auth.role).iter().map(|p| p.key()).collect(),
    })
}

/// List users (paginated).
///
/// `GET /api/admin/users`
#[tracing::instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<UserSummary>>, AdminError> {
    let limit = params.limit.clamp(1, 200);
    let offset = params.offset.max(0);

    let users = query_users(&state.db, limit, offset).await?;
    let total = count_users(&state.db).await?;

    Ok(Json(PaginatedResponse {
        items: users.into_iter().map(UserSummary::from).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get user details, including the role's closure and permission keys.
///
/// `GET /api/admin/users/{id}`
#[tracing::instrument(skip(state))]
pub async fn get_user_details(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDetails>, AdminError> {
    let user = find_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AdminError::NotFound("User".to_string()))?;

    Ok(Json(UserDetails::from(user)))
}

/// Change a user's role.
///
/// `PUT /api/admin/users/{id}/role`
///
/// The change is authorized against the target's current role, persisted,
/// and written to the audit log.
#[tracing::instrument(skip(state, auth), fields(actor_id = %auth.id))]
pub async fn change_user_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ChangeRoleRequest>,
) -> Result<Json<RoleChangeResponse>, AdminError> {
    let target = find_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AdminError::NotFound("User".to_string()))?;

    let previous_role = target.role;
    check_role_change(auth.role, previous_role, body.role)?;

    let updated = update_user_role(&state.db, user_id, body.role)
        .await?
        .ok_or_else(|| AdminError::NotFound("User".to_string()))?;

    write_audit_log(
        &state.db,
        auth.id,
        "admin.change_role",
        Some("user"),
        Some(user_id),
        Some(serde_json::json!({
            "from": previous_role,
            "to": updated.role,
        })),
    )
    .await?;

    tracing::info!(
        target_id = %user_id,
        from = %previous_role,
        to = %updated.role,
        "Role changed"
    );

    Ok(Json(RoleChangeResponse {
        id: updated.id,
        previous_role,
        role: updated.role,
    }))
}

/// List the permission catalog, grouped by category.
///
/// `GET /api/admin/permissions`
///
/// Display metadata only; grouping carries no authorization semantics.
#[tracing::instrument]
pub async fn list_permissions() -> Json<Vec<PermissionCategoryGroup>> {
    let groups = PermissionCategory::all()
        .iter()
        .map(|category| PermissionCategoryGroup {
            category: *category,
            label: category.label(),
            permissions: Permission::all()
                .iter()
                .filter(|p| p.category() == *category)
                .map(|p| PermissionEntry {
                    key: p.key(),
                    description: p.description(),
                })
                .collect(),
        })
        .collect();

    Json(groups)
}

/// Read the audit log (paginated, optional action-prefix filter).
///
/// `GET /api/admin/audit-log`
///
/// Gated on the `system.audit` permission key instead of a role
/// allow-list.
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.id))]
pub async fn get_audit_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AuditLogParams>,
) -> Result<Json<Vec<AuditLogEntry>>, AdminError> {
    require_permission(auth.role, Permission::SystemAudit.key())?;

    let limit = params.limit.clamp(1, 200);
    let offset = params.offset.max(0);

    let entries = query_audit_log(&state.db, limit, offset, params.action.as_deref()).await?;

    Ok(Json(entries))
}
