//! Design tracker updates.

use buildbooks_core::error::CoreError;
use buildbooks_core::lifecycle::{approval_granted, ProjectPhase};
use buildbooks_core::progress::{design_progress, ClientApprovalStatus};
use buildbooks_core::types::DbId;
use buildbooks_db::models::design_project::{
    DesignProject, DesignProjectValues, UpdateDesignProject,
};
use buildbooks_db::repositories::{DesignProjectRepo, ProjectRepo};

use super::RuleEngine;
use crate::error::AppResult;

impl RuleEngine<'_> {
    /// Apply a partial update to a project's design tracker.
    ///
    /// `design_progress` is always rederived from the merged values. When the
    /// update flips approval to `approved`, the project moves to the build
    /// phase (and the project-saved hooks run). Returns `None` if the project
    /// does not exist.
    pub async fn apply_design_update(
        &self,
        project_id: DbId,
        input: &UpdateDesignProject,
    ) -> AppResult<Option<DesignProject>> {
        let Some(project) = ProjectRepo::find_by_id(self.pool, project_id).await? else {
            return Ok(None);
        };

        let current = DesignProjectRepo::ensure_for_project(self.pool, project_id).await?;
        let before = current.approval()?;
        let after = match &input.client_approval_status {
            Some(status) => status.parse::<ClientApprovalStatus>()?,
            None => before,
        };

        let design_contract_amount = input
            .design_contract_amount
            .unwrap_or(current.design_contract_amount);
        let total_received = input.total_received.unwrap_or(current.total_received);

        let values = DesignProjectValues {
            design_contract_amount,
            downpayment: input.downpayment.unwrap_or(current.downpayment),
            total_received,
            office_payroll_deduction: input
                .office_payroll_deduction
                .unwrap_or(current.office_payroll_deduction),
            design_progress: design_progress(design_contract_amount, total_received, after),
            client_approval_status: after,
        };

        let saved = DesignProjectRepo::save(self.pool, project_id, &values)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "DesignProject",
                id: project_id,
            })?;
        tracing::debug!(
            project_id,
            design_progress = saved.design_progress,
            approval = %after,
            "Design tracker updated",
        );

        if approval_granted(before, after) {
            let phase: ProjectPhase = project.phase.parse()?;
            if let Some(target) = self.rules.phase_after_approval(phase) {
                tracing::info!(project_id, phase = %target, "Design approved, advancing phase");
                if let Some(moved) =
                    ProjectRepo::set_phase(self.pool, project_id, target.as_str()).await?
                {
                    self.after_project_saved(&project, &moved).await?;
                }
            }
        }

        Ok(Some(saved))
    }
}
