//! Payment ledger entry points.

use buildbooks_core::error::CoreError;
use buildbooks_core::types::DbId;
use buildbooks_db::models::payment::{CreatePayment, LedgerChange};
use buildbooks_db::repositories::PaymentRepo;

use super::RuleEngine;
use crate::error::AppResult;

impl RuleEngine<'_> {
    /// Record a client payment against a project.
    pub async fn record_payment(
        &self,
        project_id: DbId,
        input: &CreatePayment,
        recorded_by: DbId,
    ) -> AppResult<LedgerChange> {
        let change = PaymentRepo::create_with_ledger(self.pool, project_id, input, Some(recorded_by))
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })?;

        tracing::info!(
            project_id,
            payment_id = change.payment.id,
            amount = %change.payment.amount,
            total_client_payment = %change.project.total_client_payment,
            remaining_balance = %change.project.remaining_balance,
            "Payment recorded",
        );
        Ok(change)
    }

    /// Remove a payment and roll the project's totals back.
    pub async fn remove_payment(&self, payment_id: DbId) -> AppResult<LedgerChange> {
        let change = PaymentRepo::delete_with_ledger(self.pool, payment_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Payment",
                id: payment_id,
            })?;

        tracing::info!(
            project_id = change.project.id,
            payment_id,
            amount = %change.payment.amount,
            total_client_payment = %change.project.total_client_payment,
            remaining_balance = %change.project.remaining_balance,
            "Payment removed",
        );
        Ok(change)
    }
}
