//! Handlers for a project's build tracker.

use axum::extract::{Path, State};
use axum::Json;
use buildbooks_core::error::CoreError;
use buildbooks_core::types::DbId;
use buildbooks_db::models::build_project::{BuildProject, UpdateBuildProject};
use buildbooks_db::repositories::BuildProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

fn tracker_not_found(project_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BuildProject",
        id: project_id,
    })
}

/// GET /api/v1/projects/{id}/build
///
/// 404 until the project has entered the build phase.
pub async fn get(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<BuildProject>>> {
    let tracker = BuildProjectRepo::find_by_project(&state.pool, project_id)
        .await?
        .ok_or_else(|| tracker_not_found(project_id))?;
    Ok(Json(DataResponse { data: tracker }))
}

/// PUT /api/v1/projects/{id}/build
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateBuildProject>,
) -> AppResult<Json<DataResponse<BuildProject>>> {
    input.validate()?;

    let tracker = BuildProjectRepo::update(&state.pool, project_id, &input)
        .await?
        .ok_or_else(|| tracker_not_found(project_id))?;
    Ok(Json(DataResponse { data: tracker }))
}
