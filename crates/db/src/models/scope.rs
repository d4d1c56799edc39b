//! Project scope (work item) model and DTOs.

use buildbooks_core::types::{DbId, Timestamp};
use buildbooks_core::validation::{
    validate_non_negative_amount, validate_percent, validate_scope_status,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `project_scopes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectScope {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub progress_percent: i32,
    pub weight_percent: Decimal,
    pub contract_amount: Decimal,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a scope. `project_id` comes from the route.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateScope {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0, max = 100))]
    pub progress_percent: Option<i32>,
    #[validate(custom(function = "validate_percent"))]
    pub weight_percent: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub contract_amount: Option<Decimal>,
    /// Defaults to `NOT_STARTED` if omitted.
    #[validate(custom(function = "validate_scope_status"))]
    pub status: Option<String>,
}

/// DTO for updating a scope. Setting `project_id` moves the scope to
/// another project.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateScope {
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub progress_percent: Option<i32>,
    #[validate(custom(function = "validate_percent"))]
    pub weight_percent: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub contract_amount: Option<Decimal>,
    #[validate(custom(function = "validate_scope_status"))]
    pub status: Option<String>,
}
