//! Handlers for a project's design tracker.

use axum::extract::{Path, State};
use axum::Json;
use buildbooks_core::error::CoreError;
use buildbooks_core::types::DbId;
use buildbooks_db::models::design_project::{DesignProject, UpdateDesignProject};
use buildbooks_db::repositories::DesignProjectRepo;
use validator::Validate;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/design
///
/// Creates an empty tracker on first access.
pub async fn get(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<DesignProject>>> {
    ensure_project(&state, project_id).await?;
    let tracker = DesignProjectRepo::ensure_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tracker }))
}

/// PUT /api/v1/projects/{id}/design
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateDesignProject>,
) -> AppResult<Json<DataResponse<DesignProject>>> {
    input.validate()?;

    let tracker = state
        .rules()
        .apply_design_update(project_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    Ok(Json(DataResponse { data: tracker }))
}
