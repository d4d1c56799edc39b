//! Repository for the `build_projects` table.

use buildbooks_core::types::DbId;
use sqlx::PgPool;

use crate::models::build_project::{BuildProject, UpdateBuildProject};

const COLUMNS: &str = "id, project_id, contract_amount, materials_cost, labor_cost, \
    miscellaneous_cost, total_received, created_at, updated_at";

/// Provides access to a project's build tracker.
pub struct BuildProjectRepo;

impl BuildProjectRepo {
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<BuildProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM build_projects WHERE project_id = $1");
        sqlx::query_as::<_, BuildProject>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a zeroed build tracker unless one already exists.
    ///
    /// Returns `true` if a row was inserted. An existing tracker is never
    /// touched.
    pub async fn create_if_absent(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO build_projects (project_id) VALUES ($1) \
             ON CONFLICT (project_id) DO NOTHING",
        )
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a build tracker. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        input: &UpdateBuildProject,
    ) -> Result<Option<BuildProject>, sqlx::Error> {
        let query = format!(
            "UPDATE build_projects SET
                contract_amount = COALESCE($2, contract_amount),
                materials_cost = COALESCE($3, materials_cost),
                labor_cost = COALESCE($4, labor_cost),
                miscellaneous_cost = COALESCE($5, miscellaneous_cost),
                total_received = COALESCE($6, total_received)
             WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuildProject>(&query)
            .bind(project_id)
            .bind(input.contract_amount)
            .bind(input.materials_cost)
            .bind(input.labor_cost)
            .bind(input.miscellaneous_cost)
            .bind(input.total_received)
            .fetch_optional(pool)
            .await
    }
}
