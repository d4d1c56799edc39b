//! Token-gated public progress submissions.

use buildbooks_core::error::CoreError;
use buildbooks_core::types::DbId;
use buildbooks_db::models::submit_token::ProgressSubmitToken;
use buildbooks_db::repositories::{ScopeRepo, SubmitTokenRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::RuleEngine;
use crate::error::AppResult;

/// Entity name used in every token lookup failure.
const TOKEN_ENTITY: &str = "Progress submit token";

/// One scope progress value submitted through a token.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ScopeProgressUpdate {
    pub scope_id: DbId,
    #[validate(range(min = 0, max = 100))]
    pub progress_percent: i32,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub project_id: DbId,
    pub overall_progress: i32,
    pub status: String,
    pub updated_scopes: usize,
    pub submission_count: i32,
}

impl RuleEngine<'_> {
    /// Resolve a shared token string to an active token.
    ///
    /// Unknown, expired and revoked tokens all produce the same not-found
    /// error.
    pub async fn active_submit_token(&self, token: &str) -> AppResult<ProgressSubmitToken> {
        let found = SubmitTokenRepo::find_by_token(self.pool, token).await?;
        match found {
            Some(t) if t.is_active() => Ok(t),
            Some(t) => {
                tracing::debug!(
                    token_id = t.id,
                    state = ?t.state_at(chrono::Utc::now()),
                    "Rejected inactive submit token",
                );
                Err(CoreError::NotFoundKey {
                    entity: TOKEN_ENTITY,
                }
                .into())
            }
            None => Err(CoreError::NotFoundKey {
                entity: TOKEN_ENTITY,
            }
            .into()),
        }
    }

    /// Apply a batch of scope progress values on behalf of a token holder.
    ///
    /// Every scope must belong to the token's project; otherwise nothing is
    /// written. The token is claimed inside the write transaction, so a token
    /// revoked or expired after the lookup rejects the whole batch. On
    /// success the project's progress is recomputed once.
    pub async fn submit_progress(
        &self,
        token: &str,
        updates: &[ScopeProgressUpdate],
    ) -> AppResult<SubmissionReceipt> {
        let token = self.active_submit_token(token).await?;

        let mut tx = self.pool.begin().await?;
        let Some(token) = SubmitTokenRepo::record_submission(&mut tx, token.id).await? else {
            tx.rollback().await?;
            tracing::debug!(token_id = token.id, "Submit token went inactive mid-request");
            return Err(CoreError::NotFoundKey {
                entity: TOKEN_ENTITY,
            }
            .into());
        };
        for update in updates {
            let applied = ScopeRepo::set_progress(
                &mut tx,
                update.scope_id,
                token.project_id,
                update.progress_percent,
            )
            .await?;
            if !applied {
                tx.rollback().await?;
                return Err(CoreError::Validation(format!(
                    "Scope {} does not belong to this project",
                    update.scope_id
                ))
                .into());
            }
        }
        tx.commit().await?;

        tracing::info!(
            token_id = token.id,
            project_id = token.project_id,
            scopes = updates.len(),
            submission_count = token.submission_count,
            "Accepted public progress submission",
        );

        let project = self
            .recompute_overall_progress(token.project_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: token.project_id,
            })?;

        Ok(SubmissionReceipt {
            project_id: project.id,
            overall_progress: project.overall_progress,
            status: project.status,
            updated_scopes: updates.len(),
            submission_count: token.submission_count,
        })
    }
}
