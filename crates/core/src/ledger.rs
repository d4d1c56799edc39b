//! Payment ledger arithmetic.
//!
//! A project carries a denormalized view of its payments. These functions
//! compute the next view from the current one; persisting it together with
//! the payment row (in one transaction) is the repository's job.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::remaining_balance;
use crate::types::Date;

/// Aggregate payment columns stored on a project row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentTotals {
    pub total_client_payment: Decimal,
    pub remaining_balance: Decimal,
    pub last_paid_date: Option<Date>,
}

impl PaymentTotals {
    /// Totals after a payment of `amount` dated `date_paid` was recorded.
    pub fn after_insert(self, contract_amount: Decimal, amount: Decimal, date_paid: Date) -> Self {
        let total = self.total_client_payment + amount;
        let last_paid_date = match self.last_paid_date {
            Some(current) if current >= date_paid => Some(current),
            _ => Some(date_paid),
        };
        Self {
            total_client_payment: total,
            remaining_balance: remaining_balance(contract_amount, total),
            last_paid_date,
        }
    }

    /// Totals after a payment of `amount` was removed.
    ///
    /// `latest_remaining` is the max `date_paid` over the payments that are
    /// still on file (`None` when none remain).
    pub fn after_delete(
        self,
        contract_amount: Decimal,
        amount: Decimal,
        latest_remaining: Option<Date>,
    ) -> Self {
        let total = self.total_client_payment - amount;
        Self {
            total_client_payment: total,
            remaining_balance: remaining_balance(contract_amount, total),
            last_paid_date: latest_remaining,
        }
    }
}
