//! Repository for the `payments` table.
//!
//! Payments are never written on their own: every insert or delete also
//! rewrites the owning project's payment totals inside the same transaction,
//! with the project row locked first.

use buildbooks_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, LedgerChange, Payment};
use crate::repositories::ProjectRepo;

const COLUMNS: &str =
    "id, project_id, amount, date_paid, reference, recorded_by, created_at, updated_at";

/// Provides ledger-consistent operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// List a project's payments, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE project_id = $1 \
             ORDER BY date_paid DESC, id DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Record a payment and fold it into the project's totals.
    ///
    /// Returns `None` (with nothing written) if the project does not exist.
    pub async fn create_with_ledger(
        pool: &PgPool,
        project_id: DbId,
        input: &CreatePayment,
        recorded_by: Option<DbId>,
    ) -> Result<Option<LedgerChange>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(project) = ProjectRepo::lock_for_update(&mut tx, project_id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO payments (project_id, amount, date_paid, reference, recorded_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(project_id)
            .bind(input.amount)
            .bind(input.date_paid)
            .bind(&input.reference)
            .bind(recorded_by)
            .fetch_one(&mut *tx)
            .await?;

        let totals = project.payment_totals().after_insert(
            project.contract_amount,
            payment.amount,
            payment.date_paid,
        );
        let project = ProjectRepo::update_payment_totals(&mut tx, project_id, &totals).await?;

        tx.commit().await?;
        Ok(Some(LedgerChange { payment, project }))
    }

    /// Remove a payment and take it back out of the project's totals.
    ///
    /// `last_paid_date` is recomputed from the payments still on file.
    /// Returns `None` if the payment does not exist.
    pub async fn delete_with_ledger(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LedgerChange>, sqlx::Error> {
        let project_id: Option<DbId> =
            sqlx::query_scalar("SELECT project_id FROM payments WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        let Some(project_id) = project_id else {
            return Ok(None);
        };

        let mut tx = pool.begin().await?;

        let Some(project) = ProjectRepo::lock_for_update(&mut tx, project_id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        // A concurrent delete may have won between the lookup and the lock.
        let query = format!(
            "DELETE FROM payments WHERE id = $1 AND project_id = $2 RETURNING {COLUMNS}"
        );
        let Some(payment) = sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let latest: Option<Date> =
            sqlx::query_scalar("SELECT MAX(date_paid) FROM payments WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&mut *tx)
                .await?;

        let totals =
            project
                .payment_totals()
                .after_delete(project.contract_amount, payment.amount, latest);
        let project = ProjectRepo::update_payment_totals(&mut tx, project_id, &totals).await?;

        tx.commit().await?;
        Ok(Some(LedgerChange { payment, project }))
    }
}
