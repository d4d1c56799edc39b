pub mod health;
pub mod notification;
pub mod payment;
pub mod project;
pub mod public;
pub mod scope;
pub mod submit_token;
pub mod weekly_accomplishment;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                  list, create
/// /projects/{id}                             get, update, delete
/// /projects/{id}/scopes                      list, create
/// /projects/{id}/design                      get, update (approval)
/// /projects/{id}/build                       get, update
/// /projects/{id}/payments                    list, record
/// /projects/{id}/submit-tokens               list, issue
///
/// /scopes/{id}                               update, delete
/// /payments/{id}                             delete
/// /submit-tokens/{id}/revoke                 revoke (POST)
///
/// /weekly-accomplishments                    list, create
/// /weekly-accomplishments/{id}               update, delete
///
/// /notifications                             list
/// /notifications/read-all                    mark all read (POST)
/// /notifications/unread-count                unread count
/// /notifications/{id}/read                   mark read (POST)
///
/// /public/progress/{token}                   view, submit (no auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/scopes", scope::router())
        .nest("/payments", payment::router())
        .nest("/submit-tokens", submit_token::router())
        .nest("/weekly-accomplishments", weekly_accomplishment::router())
        .nest("/notifications", notification::router())
        .nest("/public", public::router())
}
