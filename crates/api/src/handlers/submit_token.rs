//! Staff handlers for progress submission tokens.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildbooks_core::error::CoreError;
use buildbooks_core::roles::ROLE_FOREMAN;
use buildbooks_core::submit_token::{expiry_from_days, generate_token, TokenState};
use buildbooks_core::types::DbId;
use buildbooks_db::models::submit_token::{IssueSubmitToken, ProgressSubmitToken};
use buildbooks_db::repositories::{SubmitTokenRepo, UserRepo};
use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// A token together with its lifecycle state at response time.
#[derive(Debug, Serialize)]
pub struct SubmitTokenView {
    #[serde(flatten)]
    pub token: ProgressSubmitToken,
    pub state: TokenState,
}

impl From<ProgressSubmitToken> for SubmitTokenView {
    fn from(token: ProgressSubmitToken) -> Self {
        let state = token.state_at(Utc::now());
        Self { token, state }
    }
}

/// GET /api/v1/projects/{id}/submit-tokens
pub async fn list_by_project(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<SubmitTokenView>>>> {
    ensure_project(&state, project_id).await?;
    let tokens = SubmitTokenRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse {
        data: tokens.into_iter().map(SubmitTokenView::from).collect(),
    }))
}

/// POST /api/v1/projects/{id}/submit-tokens
///
/// Issue a shareable link token for one foreman on one project.
pub async fn issue(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<IssueSubmitToken>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitTokenView>>)> {
    input.validate()?;
    ensure_project(&state, project_id).await?;

    let foreman = UserRepo::find_by_id(&state.pool, input.foreman_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.foreman_id,
        }))?;
    if foreman.role != ROLE_FOREMAN || !foreman.is_active {
        return Err(AppError::BadRequest(format!(
            "User {} is not an active foreman",
            foreman.id
        )));
    }

    let expires_at = expiry_from_days(Utc::now(), input.expires_in_days)?;
    let token = SubmitTokenRepo::create(
        &state.pool,
        project_id,
        foreman.id,
        &generate_token(),
        expires_at,
        Some(user.user_id),
    )
    .await?;

    tracing::info!(
        token_id = token.id,
        project_id,
        foreman_id = foreman.id,
        issued_by = user.user_id,
        "Progress submit token issued",
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitTokenView::from(token),
        }),
    ))
}

/// POST /api/v1/submit-tokens/{id}/revoke
///
/// Idempotent: revoking an already revoked token keeps the first timestamp.
pub async fn revoke(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SubmitTokenView>>> {
    let token = SubmitTokenRepo::revoke(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgressSubmitToken",
            id,
        }))?;

    tracing::info!(token_id = id, revoked_by = user.user_id, "Progress submit token revoked");
    Ok(Json(DataResponse {
        data: SubmitTokenView::from(token),
    }))
}
