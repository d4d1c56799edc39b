//! Progress roll-up rules.
//!
//! - Overall project progress from its scopes, falling back to the latest
//!   week of accomplishment reports.
//! - Design-phase progress from the received/contract payment ratio.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{mean, ratio_percent, round_percent};
use crate::text_enum::define_text_enum;
use crate::types::Date;

define_text_enum! {
    /// Work status of a single scope.
    ScopeStatus ("scope status") {
        NotStarted => "NOT_STARTED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
    }
}

define_text_enum! {
    /// Client sign-off state of a design tracker.
    ClientApprovalStatus ("client approval status") {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

/// One weekly accomplishment report as seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub week_start: Date,
    pub percent_completed: Decimal,
}

/// Simple mean of scope progress percentages.
///
/// `weight_percent` is deliberately not consulted: the roll-up has always
/// been an unweighted average and stored progress values depend on it.
pub fn mean_scope_progress(progress_percents: &[i32]) -> Option<i32> {
    mean(progress_percents.iter().map(|p| Decimal::from(*p))).map(round_percent)
}

/// Average `percent_completed` over the reports sharing the latest
/// `week_start`. Reports from earlier weeks are ignored.
pub fn latest_week_progress(entries: &[WeeklyEntry]) -> Option<i32> {
    let latest = entries.iter().map(|e| e.week_start).max()?;
    mean(
        entries
            .iter()
            .filter(|e| e.week_start == latest)
            .map(|e| e.percent_completed),
    )
    .map(round_percent)
}

/// Overall project progress.
///
/// Scopes win whenever at least one exists; otherwise the latest week of
/// accomplishment reports is used; otherwise 0.
pub fn overall_progress(scope_percents: &[i32], weekly: &[WeeklyEntry]) -> i32 {
    mean_scope_progress(scope_percents)
        .or_else(|| latest_week_progress(weekly))
        .unwrap_or(0)
}

/// Design-phase progress derived from payments.
///
/// Approval overrides everything. A zero contract amount yields 0 instead of
/// dividing by zero.
pub fn design_progress(
    design_contract_amount: Decimal,
    total_received: Decimal,
    approval: ClientApprovalStatus,
) -> i32 {
    if approval == ClientApprovalStatus::Approved {
        return 100;
    }
    ratio_percent(total_received, design_contract_amount)
        .map(round_percent)
        .unwrap_or(0)
}
