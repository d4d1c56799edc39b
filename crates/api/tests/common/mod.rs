//! Shared helpers for API integration tests.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`,
//! no TCP listener involved.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use buildbooks_api::auth::jwt::{generate_access_token, JwtConfig};
use buildbooks_api::config::ServerConfig;
use buildbooks_api::notifications::DbNotifier;
use buildbooks_api::router::build_app_router;
use buildbooks_api::state::AppState;
use buildbooks_core::error::CoreError;
use buildbooks_core::lifecycle::RulesConfig;
use buildbooks_core::notify::{Notifier, ProjectCompleted};
use buildbooks_core::types::DbId;
use buildbooks_db::models::user::CreateUser;
use buildbooks_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-entropy".to_string(),
            access_token_expiry_mins: 15,
        },
        rules: RulesConfig::default(),
    }
}

/// Notifier that remembers `(user_id, project_id)` for every delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(DbId, DbId)>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<(DbId, DbId)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, user_id: DbId, event: &ProjectCompleted) -> Result<(), CoreError> {
        self.calls.lock().unwrap().push((user_id, event.project_id));
        Ok(())
    }
}

/// A seeded user together with a valid bearer token.
pub struct Actor {
    pub id: DbId,
    pub token: String,
}

impl Actor {
    pub fn auth(&self) -> Option<&str> {
        Some(self.token.as_str())
    }
}

/// One active user per role.
pub struct TestUsers {
    pub head_admin: Actor,
    pub admin: Actor,
    pub hr: Actor,
    pub foreman: Actor,
}

/// Insert a user with `role` and mint a token for it.
pub async fn seed_user(pool: &PgPool, config: &ServerConfig, username: &str, role: &str) -> Actor {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@buildbooks.test"),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
    let token = generate_access_token(user.id, &user.role, &config.jwt).unwrap();
    Actor { id: user.id, token }
}

/// A router factory plus the seeded users and notifier behind it.
pub struct TestApp {
    pub pool: PgPool,
    pub config: ServerConfig,
    pub users: TestUsers,
    pub notifier: Arc<RecordingNotifier>,
    state: AppState,
}

impl TestApp {
    /// App whose completion notices go to a [`RecordingNotifier`].
    pub async fn new(pool: PgPool) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        Self::build(pool, notifier.clone(), notifier).await
    }

    /// App wired to the production [`DbNotifier`].
    pub async fn with_db_notifier(pool: PgPool) -> Self {
        let notifier = Arc::new(DbNotifier::new(pool.clone()));
        Self::build(pool, notifier, Arc::new(RecordingNotifier::default())).await
    }

    async fn build(
        pool: PgPool,
        notifier: Arc<dyn Notifier>,
        recorder: Arc<RecordingNotifier>,
    ) -> Self {
        let config = test_config();
        let users = TestUsers {
            head_admin: seed_user(&pool, &config, "hana", "head_admin").await,
            admin: seed_user(&pool, &config, "arlo", "admin").await,
            hr: seed_user(&pool, &config, "hollis", "hr").await,
            foreman: seed_user(&pool, &config, "fern", "foreman").await,
        };
        let state = AppState {
            pool: pool.clone(),
            config: Arc::new(config.clone()),
            notifier,
        };
        Self {
            pool,
            config,
            users,
            notifier: recorder,
            state,
        }
    }

    /// A fresh router over the shared state (`oneshot` consumes it).
    pub fn router(&self) -> Router {
        build_app_router(self.state.clone(), &self.config)
    }

    /// Create a project as `admin` and return its id.
    pub async fn create_project(&self, body: serde_json::Value) -> DbId {
        let response = post_json(
            self.router(),
            "/api/v1/projects",
            self.users.admin.auth(),
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED, "project creation failed");
        body_json(response).await["data"]["id"].as_i64().unwrap()
    }

    /// Add a scope as `admin` and return its id.
    pub async fn create_scope(&self, project_id: DbId, name: &str, progress: i32) -> DbId {
        let response = post_json(
            self.router(),
            &format!("/api/v1/projects/{project_id}/scopes"),
            self.users.admin.auth(),
            serde_json::json!({ "name": name, "progress_percent": progress }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED, "scope creation failed");
        body_json(response).await["data"]["id"].as_i64().unwrap()
    }

    /// Fetch a project as `admin` and return its `data` object.
    pub async fn project(&self, project_id: DbId) -> serde_json::Value {
        let response = get(
            self.router(),
            &format!("/api/v1/projects/{project_id}"),
            self.users.admin.auth(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["data"].clone()
    }
}

/// Send a request with an optional bearer token and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::POST, uri, token, None).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a decimal serialized either as a string or a number.
pub fn dec(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::String(s) => s.parse().unwrap(),
        other => other.to_string().parse().unwrap(),
    }
}

pub fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}
