//! Project phase/status vocabulary and the transition rules that act on it.
//!
//! The two markers the rules compare against (the "ready for build" phase and
//! the "completed" status) are not hard-coded: they come from [`RulesConfig`],
//! which the service builds from its environment at startup.

use crate::error::CoreError;
use crate::progress::ClientApprovalStatus;
use crate::text_enum::define_text_enum;

define_text_enum! {
    /// Lifecycle stage of a project.
    ProjectPhase ("phase") {
        Design => "DESIGN",
        ForBuild => "FOR_BUILD",
        Build => "BUILD",
    }
}

define_text_enum! {
    /// Operational state of a project.
    ProjectStatus ("status") {
        Planning => "PLANNING",
        Active => "ACTIVE",
        OnHold => "ON_HOLD",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

/// Progress at or above which a project is considered finished.
pub const COMPLETION_THRESHOLD: i32 = 100;

/// Markers consulted by the phase-transition and completion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// Phase that means "ready for build" (default `FOR_BUILD`).
    pub build_phase: ProjectPhase,
    /// Status that means "closed out" (default `COMPLETED`).
    pub completed_status: ProjectStatus,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            build_phase: ProjectPhase::ForBuild,
            completed_status: ProjectStatus::Completed,
        }
    }
}

impl RulesConfig {
    /// Build a config from the two raw marker strings.
    pub fn from_markers(build_phase: &str, completed_status: &str) -> Result<Self, CoreError> {
        Ok(Self {
            build_phase: build_phase.parse()?,
            completed_status: completed_status.parse()?,
        })
    }

    /// `true` when a save moved the project *into* the build phase.
    ///
    /// Re-saving a project that is already in the build phase is not a
    /// transition.
    pub fn enters_build_phase(&self, before: &str, after: &str) -> bool {
        before != after && after == self.build_phase.as_str()
    }

    /// Phase a project should move to once its design is approved.
    ///
    /// `None` when the project already sits at or past the build phase, so
    /// approval never moves a project backwards.
    pub fn phase_after_approval(&self, current: ProjectPhase) -> Option<ProjectPhase> {
        let rank = |phase: ProjectPhase| ProjectPhase::ALL.iter().position(|p| *p == phase);
        (rank(current) < rank(self.build_phase)).then_some(self.build_phase)
    }

    /// `true` when a project with this progress/status must be closed out.
    pub fn should_complete(&self, overall_progress: i32, status: &str) -> bool {
        overall_progress >= COMPLETION_THRESHOLD && status != self.completed_status.as_str()
    }
}

/// `true` when a design tracker update flips approval to `approved`.
pub fn approval_granted(before: ClientApprovalStatus, after: ClientApprovalStatus) -> bool {
    before != ClientApprovalStatus::Approved && after == ClientApprovalStatus::Approved
}
