//! Authentication, authorization and error body shape.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, send, TestApp};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_token_is_401(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = get(app.router(), "/api/v1/projects", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn forged_token_is_401(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = get(app.router(), "/api/v1/projects", Some("not.a.jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_bearer_scheme_is_401(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let request = axum::http::Request::builder()
        .uri("/api/v1/projects")
        .header("authorization", format!("Basic {}", app.users.admin.token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreman_cannot_create_projects(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = post_json(
        app.router(),
        "/api/v1/projects",
        app.users.foreman.auth(),
        json!({ "name": "Nope" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_head_admin_deletes_projects(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let project = app.create_project(json!({ "name": "Doomed" })).await;
    app.create_scope(project, "Walls", 10).await;
    let uri = format!("/api/v1/projects/{project}");

    let response = delete(app.router(), &uri, app.users.admin.auth()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(app.router(), &uri, app.users.head_admin.auth()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.router(), &uri, app.users.admin.auth()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hr_cannot_edit_scopes(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let project = app.create_project(json!({ "name": "Scoped" })).await;

    let response = post_json(
        app.router(),
        &format!("/api/v1/projects/{project}/scopes"),
        app.users.hr.auth(),
        json!({ "name": "Walls" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Error bodies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn not_found_names_the_entity(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = get(app.router(), "/api/v1/projects/424242", app.users.admin.auth()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_fields_are_listed(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let response = post_json(
        app.router(),
        "/api/v1/projects",
        app.users.admin.auth(),
        json!({ "name": "", "phase": "LATER", "contract_amount": "-5" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    for field in ["name", "phase", "contract_amount"] {
        assert!(json["fields"][field].is_array(), "missing field error for {field}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_rejected(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/projects")
        .header("authorization", format!("Bearer {}", app.users.admin.token))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_endpoints_clamp_pagination(pool: PgPool) {
    let app = TestApp::new(pool).await;
    for name in ["A", "B", "C"] {
        app.create_project(json!({ "name": name })).await;
    }

    let response = send(
        app.router(),
        axum::http::Method::GET,
        "/api/v1/projects?limit=2&offset=-1",
        app.users.hr.auth(),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}
