//! Handlers for client payments.
//!
//! Restricted to finance roles. Inserts and deletes go through the rule
//! engine so the project totals move with the payment rows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildbooks_core::types::DbId;
use buildbooks_db::models::payment::{CreatePayment, LedgerChange, Payment};
use buildbooks_db::repositories::PaymentRepo;
use validator::Validate;

use super::ensure_project;
use crate::error::AppResult;
use crate::middleware::rbac::RequireFinance;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/payments
pub async fn list_by_project(
    RequireFinance(_user): RequireFinance,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    ensure_project(&state, project_id).await?;
    let payments = PaymentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: payments }))
}

/// POST /api/v1/projects/{id}/payments
///
/// Returns the payment and the project's updated totals.
pub async fn create(
    RequireFinance(user): RequireFinance,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<DataResponse<LedgerChange>>)> {
    input.validate()?;
    let change = state
        .rules()
        .record_payment(project_id, &input, user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: change })))
}

/// DELETE /api/v1/payments/{id}
///
/// Returns the removed payment and the project's updated totals.
pub async fn delete(
    RequireFinance(_user): RequireFinance,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LedgerChange>>> {
    let change = state.rules().remove_payment(id).await?;
    Ok(Json(DataResponse { data: change }))
}
