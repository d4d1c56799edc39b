//! Progress submission token model and DTOs.

use buildbooks_core::submit_token::{token_state, TokenState};
use buildbooks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `progress_submit_tokens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressSubmitToken {
    pub id: DbId,
    pub project_id: DbId,
    pub foreman_id: DbId,
    pub token: String,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
    pub last_submitted_at: Option<Timestamp>,
    pub submission_count: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProgressSubmitToken {
    pub fn state_at(&self, now: Timestamp) -> TokenState {
        token_state(self.revoked_at, self.expires_at, now)
    }

    pub fn is_active(&self) -> bool {
        self.state_at(chrono::Utc::now()).is_active()
    }
}

/// DTO for issuing a token for a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueSubmitToken {
    pub foreman_id: DbId,
    /// Lifetime in days; omitted means no expiry.
    #[validate(range(min = 1, max = 365))]
    pub expires_in_days: Option<i64>,
}
