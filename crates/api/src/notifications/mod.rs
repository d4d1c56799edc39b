//! Notification delivery.
//!
//! [`DbNotifier`] is the production [`Notifier`](buildbooks_core::notify::Notifier):
//! it stores one in-app notification row per recipient, which users read
//! through the `/notifications` endpoints.

pub mod db_notifier;

pub use db_notifier::DbNotifier;
