//! Design-phase tracker model and DTOs.

use buildbooks_core::error::CoreError;
use buildbooks_core::progress::ClientApprovalStatus;
use buildbooks_core::types::{DbId, Timestamp};
use buildbooks_core::validation::{validate_approval_status, validate_non_negative_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `design_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignProject {
    pub id: DbId,
    pub project_id: DbId,
    pub design_contract_amount: Decimal,
    pub downpayment: Decimal,
    pub total_received: Decimal,
    pub office_payroll_deduction: Decimal,
    pub design_progress: i32,
    pub client_approval_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DesignProject {
    /// Parsed approval status. Rows are constrained by a `CHECK`, so a parse
    /// failure means the schema and code disagree.
    pub fn approval(&self) -> Result<ClientApprovalStatus, CoreError> {
        self.client_approval_status.parse()
    }
}

/// DTO for the staff-editable fields. `design_progress` is always derived.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDesignProject {
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub design_contract_amount: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub downpayment: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub total_received: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub office_payroll_deduction: Option<Decimal>,
    #[validate(custom(function = "validate_approval_status"))]
    pub client_approval_status: Option<String>,
}

/// Fully resolved values written back by the design rule.
#[derive(Debug, Clone)]
pub struct DesignProjectValues {
    pub design_contract_amount: Decimal,
    pub downpayment: Decimal,
    pub total_received: Decimal,
    pub office_payroll_deduction: Decimal,
    pub design_progress: i32,
    pub client_approval_status: ClientApprovalStatus,
}
