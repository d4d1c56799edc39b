//! Unauthenticated routes. The path token is the only credential.

use axum::routing::get;
use axum::Router;

use crate::handlers::public_progress;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET    /progress/{token}    -> view
/// POST   /progress/{token}    -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/progress/{token}",
        get(public_progress::view).post(public_progress::submit),
    )
}
