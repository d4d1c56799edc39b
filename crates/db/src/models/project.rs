//! Project entity model and DTOs.

use buildbooks_core::ledger::PaymentTotals;
use buildbooks_core::types::{Date, DbId, Timestamp};
use buildbooks_core::validation::{
    validate_non_negative_amount, validate_phase, validate_project_status,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub phase: String,
    pub status: String,
    pub overall_progress: i32,
    pub contract_amount: Decimal,
    pub design_fee: Decimal,
    pub construction_cost: Decimal,
    pub total_client_payment: Decimal,
    pub remaining_balance: Decimal,
    pub last_paid_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The denormalized payment columns as a ledger value.
    pub fn payment_totals(&self) -> PaymentTotals {
        PaymentTotals {
            total_client_payment: self.total_client_payment,
            remaining_balance: self.remaining_balance,
            last_paid_date: self.last_paid_date,
        }
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub client_name: Option<String>,
    pub location: Option<String>,
    /// Defaults to `DESIGN` if omitted.
    #[validate(custom(function = "validate_phase"))]
    pub phase: Option<String>,
    /// Defaults to `PLANNING` if omitted.
    #[validate(custom(function = "validate_project_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub contract_amount: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub design_fee: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub construction_cost: Option<Decimal>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// Payment totals and `overall_progress` are derived and cannot be set here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    #[validate(custom(function = "validate_phase"))]
    pub phase: Option<String>,
    #[validate(custom(function = "validate_project_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub contract_amount: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub design_fee: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub construction_cost: Option<Decimal>,
}
