//! BuildBooks domain logic.
//!
//! The rules here are synchronous and free of I/O; the repository and HTTP
//! layers call them. The one async piece is the [`notify::Notifier`] trait,
//! which the service implements.

mod text_enum;

pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod money;
pub mod notify;
pub mod progress;
pub mod roles;
pub mod submit_token;
pub mod types;
pub mod validation;
