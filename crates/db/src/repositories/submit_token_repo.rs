//! Repository for the `progress_submit_tokens` table.

use buildbooks_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::submit_token::ProgressSubmitToken;

const COLUMNS: &str = "id, project_id, foreman_id, token, expires_at, revoked_at, \
    last_submitted_at, submission_count, created_by, created_at, updated_at";

/// Provides operations for progress submission tokens.
pub struct SubmitTokenRepo;

impl SubmitTokenRepo {
    /// Insert a freshly generated token.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        foreman_id: DbId,
        token: &str,
        expires_at: Option<Timestamp>,
        created_by: Option<DbId>,
    ) -> Result<ProgressSubmitToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress_submit_tokens
                (project_id, foreman_id, token, expires_at, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressSubmitToken>(&query)
            .bind(project_id)
            .bind(foreman_id)
            .bind(token)
            .bind(expires_at)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Look up a token by its shared string, whatever its state.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<ProgressSubmitToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM progress_submit_tokens WHERE token = $1");
        sqlx::query_as::<_, ProgressSubmitToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProgressSubmitToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress_submit_tokens WHERE project_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProgressSubmitToken>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Revoke a token. Revoking twice keeps the first `revoked_at`.
    pub async fn revoke(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProgressSubmitToken>, sqlx::Error> {
        let query = format!(
            "UPDATE progress_submit_tokens SET revoked_at = COALESCE(revoked_at, NOW()) \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressSubmitToken>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count one accepted submission within an existing transaction.
    ///
    /// Only an active token is updated; `None` means it was revoked or
    /// expired since it was looked up. The updated row stays locked until
    /// the transaction ends, so a concurrent revoke waits for it.
    pub async fn record_submission(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<ProgressSubmitToken>, sqlx::Error> {
        let query = format!(
            "UPDATE progress_submit_tokens SET
                submission_count = submission_count + 1,
                last_submitted_at = NOW()
             WHERE id = $1
               AND revoked_at IS NULL
               AND (expires_at IS NULL OR expires_at > NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressSubmitToken>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }
}
