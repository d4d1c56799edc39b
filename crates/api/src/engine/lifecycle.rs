//! Project-saved hooks: phase transitions and completion.

use buildbooks_core::error::CoreError;
use buildbooks_core::lifecycle::ProjectPhase;
use buildbooks_core::notify::ProjectCompleted;
use buildbooks_core::roles::COMPLETION_RECIPIENT_ROLES;
use buildbooks_db::models::project::Project;
use buildbooks_db::repositories::{
    BuildProjectRepo, DesignProjectRepo, ProjectRepo, UserRepo,
};

use super::RuleEngine;
use crate::error::AppResult;

impl RuleEngine<'_> {
    /// Provision the trackers a freshly created project needs.
    pub async fn after_project_created(&self, project: &Project) -> AppResult<()> {
        if project.phase == ProjectPhase::Design.as_str() {
            DesignProjectRepo::ensure_for_project(self.pool, project.id).await?;
        }
        if project.phase == self.rules.build_phase.as_str() {
            let created = BuildProjectRepo::create_if_absent(self.pool, project.id).await?;
            tracing::info!(project_id = project.id, created, "Build tracker provisioned");
        }
        Ok(())
    }

    /// Run after any write to a project row.
    ///
    /// `before` and `after` are the row as it was and as it is now. Returns
    /// the row as stored once every hook has run.
    pub async fn after_project_saved(&self, before: &Project, after: &Project) -> AppResult<Project> {
        if self.rules.enters_build_phase(&before.phase, &after.phase) {
            let created = BuildProjectRepo::create_if_absent(self.pool, after.id).await?;
            tracing::info!(
                project_id = after.id,
                phase = %after.phase,
                created,
                "Project entered build phase",
            );
        }

        if self.rules.should_complete(after.overall_progress, &after.status) {
            return self.complete_project(after).await;
        }

        Ok(after.clone())
    }

    /// Close out a project and notify the completion recipients.
    ///
    /// The status write is conditional, so only the request that actually
    /// flips the status sends notifications.
    async fn complete_project(&self, project: &Project) -> AppResult<Project> {
        let completed_status = self.rules.completed_status.as_str();
        let flipped = ProjectRepo::mark_completed(self.pool, project.id, completed_status).await?;

        if flipped {
            tracing::info!(
                project_id = project.id,
                overall_progress = project.overall_progress,
                "Project completed",
            );
            self.notify_completion(project).await;
        }

        let stored = ProjectRepo::find_by_id(self.pool, project.id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project.id,
            })?;
        Ok(stored)
    }

    /// Fan a completion notice out to every active recipient.
    ///
    /// Failures are logged and never surface to the caller.
    async fn notify_completion(&self, project: &Project) {
        let recipients =
            match UserRepo::list_active_ids_by_roles(self.pool, COMPLETION_RECIPIENT_ROLES).await {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::error!(
                        project_id = project.id,
                        error = %e,
                        "Failed to load completion recipients",
                    );
                    return;
                }
            };

        let event = ProjectCompleted::new(project.id, project.name.clone());
        let mut delivered = 0usize;
        for user_id in &recipients {
            match self.notifier.notify(*user_id, &event).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    project_id = project.id,
                    user_id,
                    error = %e,
                    "Failed to deliver completion notification",
                ),
            }
        }

        tracing::info!(
            project_id = project.id,
            recipients = recipients.len(),
            delivered,
            "Completion notifications sent",
        );
    }
}
