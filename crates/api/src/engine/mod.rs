//! Progress and financial rule engine.
//!
//! Handlers persist a change first and then call the matching hook here.
//! Each chain runs inline, in a fixed order: persist, recompute progress,
//! detect phase transitions, close out completed projects, fan out
//! notifications.
//!
//! - [`progress`] -- overall progress roll-up from scopes / weekly reports.
//! - [`lifecycle`] -- project-saved hooks: build tracker provisioning and
//!   completion.
//! - [`design`] -- design tracker updates and approval.
//! - [`ledger`] -- payment insert/delete with totals.
//! - [`submission`] -- token-gated public progress submissions.

pub mod design;
pub mod ledger;
pub mod lifecycle;
pub mod progress;
pub mod submission;

use buildbooks_core::lifecycle::RulesConfig;
use buildbooks_core::notify::Notifier;
use sqlx::PgPool;

/// Borrowed view over everything the rules need for one request.
///
/// Obtain one with [`AppState::rules`](crate::state::AppState::rules).
#[derive(Clone, Copy)]
pub struct RuleEngine<'a> {
    pool: &'a PgPool,
    rules: RulesConfig,
    notifier: &'a dyn Notifier,
}

impl<'a> RuleEngine<'a> {
    pub fn new(pool: &'a PgPool, rules: RulesConfig, notifier: &'a dyn Notifier) -> Self {
        Self {
            pool,
            rules,
            notifier,
        }
    }
}
