//! Overall progress roll-up.

use buildbooks_core::progress::overall_progress;
use buildbooks_core::types::DbId;
use buildbooks_db::models::project::Project;
use buildbooks_db::repositories::{ProjectRepo, ScopeRepo, WeeklyAccomplishmentRepo};

use super::RuleEngine;
use crate::error::AppResult;

impl RuleEngine<'_> {
    /// Recompute a project's `overall_progress` from its scopes, falling back
    /// to the latest week of accomplishment reports.
    ///
    /// The value is only written when it changed; a write runs the
    /// project-saved hooks. Returns the project as stored afterwards, or
    /// `None` if it no longer exists.
    pub async fn recompute_overall_progress(&self, project_id: DbId) -> AppResult<Option<Project>> {
        let Some(project) = ProjectRepo::find_by_id(self.pool, project_id).await? else {
            return Ok(None);
        };

        let scopes = ScopeRepo::progress_percents(self.pool, project_id).await?;
        let weekly = if scopes.is_empty() {
            WeeklyAccomplishmentRepo::latest_week_entries(self.pool, project_id).await?
        } else {
            Vec::new()
        };
        let progress = overall_progress(&scopes, &weekly);

        if progress == project.overall_progress {
            return Ok(Some(project));
        }

        let Some(saved) = ProjectRepo::set_overall_progress(self.pool, project_id, progress).await?
        else {
            return Ok(None);
        };
        tracing::info!(
            project_id,
            overall_progress = progress,
            previous = project.overall_progress,
            scopes = scopes.len(),
            "Recomputed project progress",
        );

        self.after_project_saved(&project, &saved).await.map(Some)
    }

    /// Recompute every distinct project in `project_ids`, skipping `None`.
    ///
    /// Used when a change moves a child row from one project to another.
    pub async fn recompute_projects(&self, project_ids: &[Option<DbId>]) -> AppResult<()> {
        let mut seen: Vec<DbId> = Vec::with_capacity(project_ids.len());
        for id in project_ids.iter().flatten() {
            if seen.contains(id) {
                continue;
            }
            seen.push(*id);
            self.recompute_overall_progress(*id).await?;
        }
        Ok(())
    }
}
