//! Handlers for project scopes.
//!
//! Every write recomputes the owning project's overall progress.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildbooks_core::error::CoreError;
use buildbooks_core::types::DbId;
use buildbooks_db::models::scope::{CreateScope, ProjectScope, UpdateScope};
use buildbooks_db::repositories::ScopeRepo;
use validator::Validate;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireScopeEditor, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

fn scope_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProjectScope",
        id,
    })
}

/// GET /api/v1/projects/{id}/scopes
pub async fn list_by_project(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectScope>>>> {
    ensure_project(&state, project_id).await?;
    let scopes = ScopeRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: scopes }))
}

/// POST /api/v1/projects/{id}/scopes
pub async fn create(
    RequireScopeEditor(_user): RequireScopeEditor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateScope>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectScope>>)> {
    input.validate()?;
    ensure_project(&state, project_id).await?;

    let scope = ScopeRepo::create(&state.pool, project_id, &input).await?;
    state.rules().recompute_overall_progress(project_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: scope })))
}

/// PUT /api/v1/scopes/{id}
///
/// Moving a scope to another project recomputes both projects.
pub async fn update(
    RequireScopeEditor(_user): RequireScopeEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScope>,
) -> AppResult<Json<DataResponse<ProjectScope>>> {
    input.validate()?;

    let before = ScopeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| scope_not_found(id))?;
    if let Some(target) = input.project_id {
        ensure_project(&state, target).await?;
    }

    let scope = ScopeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| scope_not_found(id))?;

    state
        .rules()
        .recompute_projects(&[Some(before.project_id), Some(scope.project_id)])
        .await?;

    Ok(Json(DataResponse { data: scope }))
}

/// DELETE /api/v1/scopes/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ScopeRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| scope_not_found(id))?;

    state
        .rules()
        .recompute_overall_progress(deleted.project_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
