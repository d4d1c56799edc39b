//! Handlers for weekly accomplishment reports.
//!
//! Foremen file and maintain their own reports; `head_admin` and `admin` can
//! act on anyone's. Reports tied to a project feed its progress fallback, so
//! every write recomputes the affected project(s).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use buildbooks_core::error::CoreError;
use buildbooks_core::roles::STAFF_ROLES;
use buildbooks_core::types::DbId;
use buildbooks_db::models::weekly_accomplishment::{
    CreateWeeklyAccomplishment, UpdateWeeklyAccomplishment, WeeklyAccomplishment,
};
use buildbooks_db::repositories::WeeklyAccomplishmentRepo;
use serde::Deserialize;
use validator::Validate;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /weekly-accomplishments`.
#[derive(Debug, Deserialize)]
pub struct WeeklyAccomplishmentQuery {
    pub foreman_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn report_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "WeeklyAccomplishment",
        id,
    })
}

/// Foremen may only touch their own reports; staff may touch any.
fn authorize_owner(auth: &AuthUser, report: &WeeklyAccomplishment) -> AppResult<()> {
    if auth.has_any_role(STAFF_ROLES) || (auth.is_foreman() && report.foreman_id == auth.user_id)
    {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Only the reporting foreman or an admin may change this report".into(),
    )))
}

/// GET /api/v1/weekly-accomplishments
///
/// Foremen only ever see their own reports.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<WeeklyAccomplishmentQuery>,
) -> AppResult<Json<DataResponse<Vec<WeeklyAccomplishment>>>> {
    let foreman_id = if auth.is_foreman() {
        Some(auth.user_id)
    } else {
        params.foreman_id
    };
    let page = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };

    let reports = WeeklyAccomplishmentRepo::list(
        &state.pool,
        foreman_id,
        params.project_id,
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: reports }))
}

/// POST /api/v1/weekly-accomplishments
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWeeklyAccomplishment>,
) -> AppResult<(StatusCode, Json<DataResponse<WeeklyAccomplishment>>)> {
    let foreman_id = if auth.is_foreman() {
        match input.foreman_id {
            Some(other) if other != auth.user_id => {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Foremen may only file their own reports".into(),
                )));
            }
            _ => auth.user_id,
        }
    } else if auth.has_any_role(STAFF_ROLES) {
        input
            .foreman_id
            .ok_or_else(|| AppError::BadRequest("foreman_id is required".into()))?
    } else {
        return Err(AppError::Core(CoreError::Forbidden(
            "Foreman or Admin role required".into(),
        )));
    };

    input.validate()?;
    if let Some(project_id) = input.project_id {
        ensure_project(&state, project_id).await?;
    }

    let report = WeeklyAccomplishmentRepo::create(&state.pool, foreman_id, &input).await?;
    state.rules().recompute_projects(&[report.project_id]).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// PUT /api/v1/weekly-accomplishments/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWeeklyAccomplishment>,
) -> AppResult<Json<DataResponse<WeeklyAccomplishment>>> {
    let before = WeeklyAccomplishmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| report_not_found(id))?;
    authorize_owner(&auth, &before)?;

    input.validate()?;
    if let Some(project_id) = input.project_id {
        ensure_project(&state, project_id).await?;
    }

    let report = WeeklyAccomplishmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| report_not_found(id))?;
    state
        .rules()
        .recompute_projects(&[before.project_id, report.project_id])
        .await?;

    Ok(Json(DataResponse { data: report }))
}

/// DELETE /api/v1/weekly-accomplishments/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = WeeklyAccomplishmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| report_not_found(id))?;
    authorize_owner(&auth, &existing)?;

    let deleted = WeeklyAccomplishmentRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| report_not_found(id))?;
    state.rules().recompute_projects(&[deleted.project_id]).await?;

    Ok(StatusCode::NO_CONTENT)
}
