//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_HEAD_ADMIN: &str = "head_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HR: &str = "hr";
pub const ROLE_FOREMAN: &str = "foreman";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_HEAD_ADMIN, ROLE_ADMIN, ROLE_HR, ROLE_FOREMAN];

/// Roles that receive a notification when a project is closed out.
pub const COMPLETION_RECIPIENT_ROLES: &[&str] = &[ROLE_HR, ROLE_HEAD_ADMIN];

/// Roles allowed to manage projects, scopes and design/build trackers.
pub const STAFF_ROLES: &[&str] = &[ROLE_HEAD_ADMIN, ROLE_ADMIN];

/// Roles allowed to record and remove client payments.
pub const FINANCE_ROLES: &[&str] = &[ROLE_HEAD_ADMIN, ROLE_HR];

/// Roles allowed to create or edit scope progress.
pub const SCOPE_EDITOR_ROLES: &[&str] = &[ROLE_HEAD_ADMIN, ROLE_ADMIN, ROLE_FOREMAN];

/// Returns `true` if `role` is one of `allowed`.
pub fn has_any_role(role: &str, allowed: &[&str]) -> bool {
    allowed.contains(&role)
}
