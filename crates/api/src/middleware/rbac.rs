//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not
//! in the extractor's allowed set. Authorization therefore happens before a
//! handler body (and any rule) runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use buildbooks_core::error::CoreError;
use buildbooks_core::roles::{
    FINANCE_ROLES, ROLE_HEAD_ADMIN, SCOPE_EDITOR_ROLES, STAFF_ROLES,
};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[&str],
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.has_any_role(allowed) {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(user)
}

/// Requires `head_admin` or `admin`. Used for project, tracker and token
/// management.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, STAFF_ROLES, "Admin role required")
            .await
            .map(RequireStaff)
    }
}

/// Requires `head_admin` or `hr`. Used for the payment ledger.
pub struct RequireFinance(pub AuthUser);

impl FromRequestParts<AppState> for RequireFinance {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, FINANCE_ROLES, "Head Admin or HR role required")
            .await
            .map(RequireFinance)
    }
}

/// Requires `head_admin`.
pub struct RequireHeadAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireHeadAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[ROLE_HEAD_ADMIN], "Head Admin role required")
            .await
            .map(RequireHeadAdmin)
    }
}

/// Requires `head_admin`, `admin` or `foreman`. Used for scope progress edits.
pub struct RequireScopeEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireScopeEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, SCOPE_EDITOR_ROLES, "Admin or Foreman role required")
            .await
            .map(RequireScopeEditor)
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for routes
/// where "this requires authentication" should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
