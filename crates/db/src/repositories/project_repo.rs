//! Repository for the `projects` table.

use buildbooks_core::ledger::PaymentTotals;
use buildbooks_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, client_name, location, phase, status, overall_progress, \
    contract_amount, design_fee, construction_cost, total_client_payment, \
    remaining_balance, last_paid_date, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Phase defaults to `DESIGN` and status to `PLANNING`. The remaining
    /// balance starts out equal to the contract amount.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, client_name, location, phase, status,
                 contract_amount, design_fee, construction_cost, remaining_balance)
             VALUES ($1, $2, $3, COALESCE($4, 'DESIGN'), COALESCE($5, 'PLANNING'),
                     COALESCE($6, 0), COALESCE($7, 0), COALESCE($8, 0), COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.client_name)
            .bind(&input.location)
            .bind(&input.phase)
            .bind(&input.status)
            .bind(input.contract_amount)
            .bind(input.design_fee)
            .bind(input.construction_cost)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects, most recently created first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// `remaining_balance` is recomputed from the (possibly new) contract
    /// amount. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                client_name = COALESCE($3, client_name),
                location = COALESCE($4, location),
                phase = COALESCE($5, phase),
                status = COALESCE($6, status),
                contract_amount = COALESCE($7, contract_amount),
                design_fee = COALESCE($8, design_fee),
                construction_cost = COALESCE($9, construction_cost),
                remaining_balance = COALESCE($7, contract_amount) - total_client_payment
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.client_name)
            .bind(&input.location)
            .bind(&input.phase)
            .bind(&input.status)
            .bind(input.contract_amount)
            .bind(input.design_fee)
            .bind(input.construction_cost)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and everything it owns. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a recomputed `overall_progress`, returning the saved row.
    pub async fn set_overall_progress(
        pool: &PgPool,
        id: DbId,
        overall_progress: i32,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET overall_progress = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(overall_progress)
            .fetch_optional(pool)
            .await
    }

    /// Move a project to `phase`, returning the saved row.
    pub async fn set_phase(
        pool: &PgPool,
        id: DbId,
        phase: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("UPDATE projects SET phase = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(phase)
            .fetch_optional(pool)
            .await
    }

    /// Close out a project by setting its status to `completed_status`.
    ///
    /// The update only matches while the status differs, so of two racing
    /// callers exactly one sees `true`.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        completed_status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET status = $2 WHERE id = $1 AND status <> $2")
            .bind(id)
            .bind(completed_status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock a project row for the rest of the transaction.
    pub async fn lock_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Write the denormalized payment columns within an existing transaction.
    pub async fn update_payment_totals(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        totals: &PaymentTotals,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                total_client_payment = $2,
                remaining_balance = $3,
                last_paid_date = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(totals.total_client_payment)
            .bind(totals.remaining_balance)
            .bind(totals.last_paid_date)
            .fetch_one(&mut **tx)
            .await
    }
}
