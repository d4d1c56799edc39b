pub mod build;
pub mod design;
pub mod notification;
pub mod payment;
pub mod project;
pub mod public_progress;
pub mod scope;
pub mod submit_token;
pub mod weekly_accomplishment;

use buildbooks_core::error::CoreError;
use buildbooks_core::types::DbId;
use buildbooks_db::models::project::Project;
use buildbooks_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a project or fail with 404.
pub(crate) async fn ensure_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}
