//! Unauthenticated, token-gated progress endpoints.
//!
//! The token in the path is the only credential. Unknown, expired and
//! revoked tokens all answer with the same 404.

use axum::extract::{Path, State};
use axum::Json;
use buildbooks_core::error::CoreError;
use buildbooks_core::types::DbId;
use buildbooks_db::repositories::{ProjectRepo, ScopeRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::submission::{ScopeProgressUpdate, SubmissionReceipt};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// What a token holder is allowed to see.
#[derive(Debug, Serialize)]
pub struct PublicProjectView {
    pub project_id: DbId,
    pub project_name: String,
    pub overall_progress: i32,
    pub scopes: Vec<PublicScope>,
}

#[derive(Debug, Serialize)]
pub struct PublicScope {
    pub id: DbId,
    pub name: String,
    pub progress_percent: i32,
    pub status: String,
}

/// Request body for `POST /public/progress/{token}`.
#[derive(Debug, Deserialize, Validate)]
pub struct PublicSubmission {
    #[validate(length(min = 1, max = 200), nested)]
    pub updates: Vec<ScopeProgressUpdate>,
}

/// GET /api/v1/public/progress/{token}
pub async fn view(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<PublicProjectView>>> {
    let token = state.rules().active_submit_token(&token).await?;

    let project = ProjectRepo::find_by_id(&state.pool, token.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundKey {
            entity: "Progress submit token",
        }))?;
    let scopes = ScopeRepo::list_by_project(&state.pool, project.id)
        .await?
        .into_iter()
        .map(|s| PublicScope {
            id: s.id,
            name: s.name,
            progress_percent: s.progress_percent,
            status: s.status,
        })
        .collect();

    Ok(Json(DataResponse {
        data: PublicProjectView {
            project_id: project.id,
            project_name: project.name,
            overall_progress: project.overall_progress,
            scopes,
        },
    }))
}

/// POST /api/v1/public/progress/{token}
pub async fn submit(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(input): Json<PublicSubmission>,
) -> AppResult<Json<DataResponse<SubmissionReceipt>>> {
    input.validate()?;
    let receipt = state.rules().submit_progress(&token, &input.updates).await?;
    Ok(Json(DataResponse { data: receipt }))
}
