//! Repository for the `project_scopes` table.

use buildbooks_core::types::DbId;
use sqlx::PgPool;

use crate::models::scope::{CreateScope, ProjectScope, UpdateScope};

const COLUMNS: &str = "id, project_id, name, progress_percent, weight_percent, \
    contract_amount, status, created_at, updated_at";

/// Provides CRUD operations for project scopes.
pub struct ScopeRepo;

impl ScopeRepo {
    /// Insert a new scope under `project_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateScope,
    ) -> Result<ProjectScope, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_scopes
                (project_id, name, progress_percent, weight_percent, contract_amount, status)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 0),
                     COALESCE($6, 'NOT_STARTED'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.progress_percent)
            .bind(input.weight_percent)
            .bind(input.contract_amount)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectScope>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_scopes WHERE id = $1");
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every scope of a project in creation order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectScope>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_scopes WHERE project_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a scope. Only non-`None` fields in `input` are applied; a new
    /// `project_id` reassigns the scope.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScope,
    ) -> Result<Option<ProjectScope>, sqlx::Error> {
        let query = format!(
            "UPDATE project_scopes SET
                project_id = COALESCE($2, project_id),
                name = COALESCE($3, name),
                progress_percent = COALESCE($4, progress_percent),
                weight_percent = COALESCE($5, weight_percent),
                contract_amount = COALESCE($6, contract_amount),
                status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.progress_percent)
            .bind(input.weight_percent)
            .bind(input.contract_amount)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a scope, returning the removed row so the caller knows which
    /// project to recompute.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<ProjectScope>, sqlx::Error> {
        let query = format!("DELETE FROM project_scopes WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Progress values of every scope of a project.
    pub async fn progress_percents(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT progress_percent FROM project_scopes WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Set one scope's progress within an existing transaction.
    ///
    /// Only matches scopes belonging to `project_id`; returns `false` for any
    /// other scope.
    pub async fn set_progress(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        project_id: DbId,
        progress_percent: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_scopes SET progress_percent = $3 \
             WHERE id = $1 AND project_id = $2",
        )
        .bind(id)
        .bind(project_id)
        .bind(progress_percent)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
