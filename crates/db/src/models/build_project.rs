//! Build-phase tracker model and DTOs.

use buildbooks_core::types::{DbId, Timestamp};
use buildbooks_core::validation::validate_non_negative_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `build_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuildProject {
    pub id: DbId,
    pub project_id: DbId,
    pub contract_amount: Decimal,
    pub materials_cost: Decimal,
    pub labor_cost: Decimal,
    pub miscellaneous_cost: Decimal,
    pub total_received: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BuildProject {
    /// Sum of all recorded cost lines.
    pub fn total_cost(&self) -> Decimal {
        self.materials_cost + self.labor_cost + self.miscellaneous_cost
    }
}

/// DTO for updating a build tracker. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBuildProject {
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub contract_amount: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub materials_cost: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub labor_cost: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub miscellaneous_cost: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub total_received: Option<Decimal>,
}
