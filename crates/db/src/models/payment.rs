//! Client payment model and DTOs.

use buildbooks_core::types::{Date, DbId, Timestamp};
use buildbooks_core::validation::validate_positive_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub project_id: DbId,
    pub amount: Decimal,
    pub date_paid: Date,
    pub reference: Option<String>,
    pub recorded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a payment. `project_id` comes from the route.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePayment {
    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,
    pub date_paid: Date,
    #[validate(length(max = 200))]
    pub reference: Option<String>,
}

/// A payment mutation together with the project totals it produced.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerChange {
    pub payment: Payment,
    pub project: crate::models::project::Project,
}
