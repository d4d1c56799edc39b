//! Repository for the `weekly_accomplishments` table.

use buildbooks_core::progress::WeeklyEntry;
use buildbooks_core::types::{Date, DbId};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::weekly_accomplishment::{
    CreateWeeklyAccomplishment, UpdateWeeklyAccomplishment, WeeklyAccomplishment,
};

const COLUMNS: &str =
    "id, foreman_id, project_id, week_start, percent_completed, notes, created_at, updated_at";

/// Provides CRUD operations for weekly accomplishment reports.
pub struct WeeklyAccomplishmentRepo;

impl WeeklyAccomplishmentRepo {
    /// Insert a report filed by `foreman_id`.
    pub async fn create(
        pool: &PgPool,
        foreman_id: DbId,
        input: &CreateWeeklyAccomplishment,
    ) -> Result<WeeklyAccomplishment, sqlx::Error> {
        let query = format!(
            "INSERT INTO weekly_accomplishments
                (foreman_id, project_id, week_start, percent_completed, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklyAccomplishment>(&query)
            .bind(foreman_id)
            .bind(input.project_id)
            .bind(input.week_start)
            .bind(input.percent_completed)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WeeklyAccomplishment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weekly_accomplishments WHERE id = $1");
        sqlx::query_as::<_, WeeklyAccomplishment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports, newest week first, optionally narrowed to one foreman
    /// and/or one project.
    pub async fn list(
        pool: &PgPool,
        foreman_id: Option<DbId>,
        project_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WeeklyAccomplishment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weekly_accomplishments
             WHERE ($1::BIGINT IS NULL OR foreman_id = $1)
               AND ($2::BIGINT IS NULL OR project_id = $2)
             ORDER BY week_start DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, WeeklyAccomplishment>(&query)
            .bind(foreman_id)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a report. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWeeklyAccomplishment,
    ) -> Result<Option<WeeklyAccomplishment>, sqlx::Error> {
        let query = format!(
            "UPDATE weekly_accomplishments SET
                project_id = COALESCE($2, project_id),
                week_start = COALESCE($3, week_start),
                percent_completed = COALESCE($4, percent_completed),
                notes = COALESCE($5, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklyAccomplishment>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(input.week_start)
            .bind(input.percent_completed)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a report, returning the removed row.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WeeklyAccomplishment>, sqlx::Error> {
        let query =
            format!("DELETE FROM weekly_accomplishments WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, WeeklyAccomplishment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reports of a project's most recent week, for the progress fallback.
    pub async fn latest_week_entries(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<WeeklyEntry>, sqlx::Error> {
        let rows: Vec<(Date, Decimal)> = sqlx::query_as(
            "SELECT week_start, percent_completed FROM weekly_accomplishments \
             WHERE project_id = $1 AND week_start = ( \
                 SELECT MAX(week_start) FROM weekly_accomplishments WHERE project_id = $1 \
             )",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(week_start, percent_completed)| WeeklyEntry {
                week_start,
                percent_completed,
            })
            .collect())
    }
}
