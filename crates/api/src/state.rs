use std::sync::Arc;

use buildbooks_core::notify::Notifier;

use crate::config::ServerConfig;
use crate::engine::RuleEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: buildbooks_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Delivery channel for completion notices.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Rule engine bound to this state's pool, markers and notifier.
    pub fn rules(&self) -> RuleEngine<'_> {
        RuleEngine::new(&self.pool, self.config.rules, self.notifier.as_ref())
    }
}
