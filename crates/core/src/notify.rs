//! Notification seam for the completion rule.
//!
//! The rule engine only knows about [`Notifier`]; the production
//! implementation writes one `notifications` row per recipient, tests plug in
//! a recorder.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// `notifications.kind` value for completion notices.
pub const KIND_PROJECT_COMPLETED: &str = "project_completed";

/// Emitted once when a project is closed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCompleted {
    pub project_id: DbId,
    pub project_name: String,
    pub message: String,
}

impl ProjectCompleted {
    pub fn new(project_id: DbId, project_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        let message = format!("Project \"{project_name}\" has reached 100% and is now completed.");
        Self {
            project_id,
            project_name,
            message,
        }
    }

    pub fn title(&self) -> &'static str {
        "Project completed"
    }
}

/// Delivers completion notices to individual users.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: DbId, event: &ProjectCompleted) -> Result<(), CoreError>;
}
