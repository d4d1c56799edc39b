//! Route definitions for the `/weekly-accomplishments` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::weekly_accomplishment;
use crate::state::AppState;

/// Routes mounted at `/weekly-accomplishments`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(weekly_accomplishment::list).post(weekly_accomplishment::create),
        )
        .route(
            "/{id}",
            put(weekly_accomplishment::update).delete(weekly_accomplishment::delete),
        )
}
