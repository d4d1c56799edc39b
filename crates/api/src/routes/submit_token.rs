use axum::routing::post;
use axum::Router;

use crate::handlers::submit_token;
use crate::state::AppState;

/// Routes mounted at `/submit-tokens`.
///
/// ```text
/// POST   /{id}/revoke    -> revoke
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/revoke", post(submit_token::revoke))
}
