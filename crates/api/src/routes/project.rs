//! Route definitions for the `/projects` resource.
//!
//! Also mounts the project-scoped scope, tracker, payment and submit token
//! collections under `/projects/{id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{build, design, payment, project, scope, submit_token};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
///
/// GET    /{id}/scopes            -> scope::list_by_project
/// POST   /{id}/scopes            -> scope::create
/// GET    /{id}/design            -> design::get
/// PUT    /{id}/design            -> design::update
/// GET    /{id}/build             -> build::get
/// PUT    /{id}/build             -> build::update
/// GET    /{id}/payments          -> payment::list_by_project
/// POST   /{id}/payments          -> payment::create
/// GET    /{id}/submit-tokens     -> submit_token::list_by_project
/// POST   /{id}/submit-tokens     -> submit_token::issue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/scopes",
            get(scope::list_by_project).post(scope::create),
        )
        .route("/{id}/design", get(design::get).put(design::update))
        .route("/{id}/build", get(build::get).put(build::update))
        .route(
            "/{id}/payments",
            get(payment::list_by_project).post(payment::create),
        )
        .route(
            "/{id}/submit-tokens",
            get(submit_token::list_by_project).post(submit_token::issue),
        )
}
