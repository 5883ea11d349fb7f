//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).
//!
//! All query functions include error context logging to aid debugging.

use av_access::Role;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use super::models::{AuditLogEntry, User};

/// Log and return a database error with context.
///
/// This helper ensures all database errors are logged with relevant context
/// before being propagated, making production debugging easier.
macro_rules! db_error {
    ($query:expr, $($field:tt)*) => {
        |e| {
            error!(query = $query, $($field)*, error = %e, "Database query failed");
            e
        }
    };
}

// ============================================================================
// User Queries
// ============================================================================

/// Find user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_id", user_id = %id))
}

/// Find user by email.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_email", email = %email))
}

/// Check if email exists.
pub async fn email_exists(pool: &PgPool, email: &str) -> sqlx::Result<bool> {
    let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(db_error!("email_exists", email = %email))?;

    Ok(result.0)
}

/// Create a user. New accounts start on the free tier.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r"
        INSERT INTO users (email, name, password_hash, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(Role::default().as_str())
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_user", email = %email))
}

/// List users ordered by creation time (paginated).
pub async fn list_users(pool: &PgPool, limit: i64, offset: i64) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        r"
        SELECT * FROM users
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        ",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_users", limit = limit, offset = offset))
}

/// Count all users.
pub async fn count_users(pool: &PgPool) -> sqlx::Result<i64> {
    let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(result.0)
}

/// Set a user's role. Returns the updated user, or `None` if the user does
/// not exist.
pub async fn update_user_role(
    pool: &PgPool,
    user_id: Uuid,
    role: Role,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r"
        UPDATE users
        SET role = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(user_id)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await
    .map_err(db_error!("update_user_role", user_id = %user_id, role = %role))
}

// ============================================================================
// Audit Log Queries
// ============================================================================

/// Write an audit log entry.
pub async fn write_audit_log(
    pool: &PgPool,
    actor_id: Uuid,
    action: &str,
    target_type: Option<&str>,
    target_id: Option<Uuid>,
    details: Option<JsonValue>,
) -> sqlx::Result<AuditLogEntry> {
    sqlx::query_as::<_, AuditLogEntry>(
        r"
        INSERT INTO audit_log (actor_id, action, target_type, target_id, details)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(actor_id)
    .bind(action)
    .bind(target_type)
    .bind(target_id)
    .bind(details)
    .fetch_one(pool)
    .await
    .map_err(db_error!("write_audit_log", actor_id = %actor_id, action = %action))
}

/// Read the audit log, newest first, optionally filtered by action prefix
/// (e.g. `"admin."` for all admin actions).
pub async fn get_audit_log(
    pool: &PgPool,
    limit: i64,
    offset: i64,
    action_prefix: Option<&str>,
) -> sqlx::Result<Vec<AuditLogEntry>> {
    match action_prefix {
        Some(prefix) => {
            sqlx::query_as::<_, AuditLogEntry>(
                r"
                SELECT * FROM audit_log
                WHERE action LIKE $3 || '%'
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                ",
            )
            .bind(limit)
            .bind(offset)
            .bind(prefix)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, AuditLogEntry>(
                r"
                SELECT * FROM audit_log
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                ",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
    .map_err(db_error!("get_audit_log", limit = limit, offset = offset))
}
