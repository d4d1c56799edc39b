//! Repository for the `design_projects` table.

use buildbooks_core::types::DbId;
use sqlx::PgPool;

use crate::models::design_project::{DesignProject, DesignProjectValues};

const COLUMNS: &str = "id, project_id, design_contract_amount, downpayment, total_received, \
    office_payroll_deduction, design_progress, client_approval_status, created_at, updated_at";

/// Provides access to a project's design tracker.
pub struct DesignProjectRepo;

impl DesignProjectRepo {
    /// Return the project's design tracker, creating an empty one if absent.
    pub async fn ensure_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<DesignProject, sqlx::Error> {
        sqlx::query(
            "INSERT INTO design_projects (project_id) VALUES ($1) \
             ON CONFLICT (project_id) DO NOTHING",
        )
        .bind(project_id)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM design_projects WHERE project_id = $1");
        sqlx::query_as::<_, DesignProject>(&query)
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the tracker with fully resolved values.
    pub async fn save(
        pool: &PgPool,
        project_id: DbId,
        values: &DesignProjectValues,
    ) -> Result<Option<DesignProject>, sqlx::Error> {
        let query = format!(
            "UPDATE design_projects SET
                design_contract_amount = $2,
                downpayment = $3,
                total_received = $4,
                office_payroll_deduction = $5,
                design_progress = $6,
                client_approval_status = $7
             WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignProject>(&query)
            .bind(project_id)
            .bind(values.design_contract_amount)
            .bind(values.downpayment)
            .bind(values.total_received)
            .bind(values.office_payroll_deduction)
            .bind(values.design_progress)
            .bind(values.client_approval_status.as_str())
            .fetch_optional(pool)
            .await
    }
}
