//! Custom field validators for request DTOs.
//!
//! Used through `#[validate(custom(function = "..."))]` on the `validator`
//! derive, so failures are reported per field.

use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::error::CoreError;
use crate::lifecycle::{ProjectPhase, ProjectStatus};
use crate::money::{MAX_AMOUNT, PERCENT_MAX, PERCENT_MIN};
use crate::progress::{ClientApprovalStatus, ScopeStatus};

fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// A decimal percentage in `[0, 100]`.
pub fn validate_percent(value: &Decimal) -> Result<(), ValidationError> {
    if *value < PERCENT_MIN || *value > PERCENT_MAX {
        return Err(error(
            "percent_range",
            format!("must be between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}

fn validate_amount_ceiling(value: &Decimal) -> Result<(), ValidationError> {
    if *value > MAX_AMOUNT {
        return Err(error(
            "amount_range",
            format!("must not exceed {MAX_AMOUNT}, got {value}"),
        ));
    }
    Ok(())
}

/// A monetary amount that may be zero but not negative.
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error(
            "non_negative",
            format!("must not be negative, got {value}"),
        ));
    }
    validate_amount_ceiling(value)
}

/// A monetary amount strictly greater than zero.
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(error("positive", format!("must be greater than 0, got {value}")));
    }
    validate_amount_ceiling(value)
}

fn validate_parses<T>(value: &str) -> Result<(), ValidationError>
where
    T: FromStr<Err = CoreError>,
{
    value
        .parse::<T>()
        .map(|_| ())
        .map_err(|e| error("invalid_choice", e.to_string()))
}

pub fn validate_phase(value: &str) -> Result<(), ValidationError> {
    validate_parses::<ProjectPhase>(value)
}

pub fn validate_project_status(value: &str) -> Result<(), ValidationError> {
    validate_parses::<ProjectStatus>(value)
}

pub fn validate_scope_status(value: &str) -> Result<(), ValidationError> {
    validate_parses::<ScopeStatus>(value)
}

pub fn validate_approval_status(value: &str) -> Result<(), ValidationError> {
    validate_parses::<ClientApprovalStatus>(value)
}
