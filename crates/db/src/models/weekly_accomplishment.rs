//! Weekly accomplishment report model and DTOs.

use buildbooks_core::types::{Date, DbId, Timestamp};
use buildbooks_core::validation::validate_percent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `weekly_accomplishments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeeklyAccomplishment {
    pub id: DbId,
    pub foreman_id: DbId,
    pub project_id: Option<DbId>,
    pub week_start: Date,
    pub percent_completed: Decimal,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a report.
///
/// `foreman_id` is taken from the caller when the caller is a foreman; staff
/// may file on a foreman's behalf.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWeeklyAccomplishment {
    pub foreman_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub week_start: Date,
    #[validate(custom(function = "validate_percent"))]
    pub percent_completed: Decimal,
    pub notes: Option<String>,
}

/// DTO for updating a report. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWeeklyAccomplishment {
    pub project_id: Option<DbId>,
    pub week_start: Option<Date>,
    #[validate(custom(function = "validate_percent"))]
    pub percent_completed: Option<Decimal>,
    pub notes: Option<String>,
}
