//! Route definitions for individual scopes.

use axum::routing::put;
use axum::Router;

use crate::handlers::scope;
use crate::state::AppState;

/// Routes mounted at `/scopes`.
///
/// ```text
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(scope::update).delete(scope::delete))
}
