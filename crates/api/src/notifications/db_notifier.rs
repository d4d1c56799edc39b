use async_trait::async_trait;
use buildbooks_core::error::CoreError;
use buildbooks_core::notify::{Notifier, ProjectCompleted, KIND_PROJECT_COMPLETED};
use buildbooks_core::types::DbId;
use buildbooks_db::repositories::NotificationRepo;
use sqlx::PgPool;

/// Writes completion notices to the `notifications` table.
#[derive(Clone)]
pub struct DbNotifier {
    pool: PgPool,
}

impl DbNotifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Notifier for DbNotifier {
    async fn notify(&self, user_id: DbId, event: &ProjectCompleted) -> Result<(), CoreError> {
        let id = NotificationRepo::create(
            &self.pool,
            user_id,
            Some(event.project_id),
            KIND_PROJECT_COMPLETED,
            event.title(),
            &event.message,
        )
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to store notification: {e}")))?;

        tracing::debug!(
            notification_id = id,
            user_id,
            project_id = event.project_id,
            "Notification stored",
        );
        Ok(())
    }
}
