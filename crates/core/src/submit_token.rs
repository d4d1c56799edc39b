//! Shareable progress-submission tokens.
//!
//! A token lets an unauthenticated link holder post progress for one
//! project. Tokens only ever move from active to inactive: expiry is
//! time-based, revocation is explicit, and neither can be undone.

use chrono::Duration;
use rand::Rng;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Length of a generated token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 40;

/// Longest lifetime a token may be issued with.
pub const MAX_EXPIRY_DAYS: i64 = 365;

/// Lifecycle state of a token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    Active,
    Expired,
    Revoked,
}

impl TokenState {
    pub fn is_active(self) -> bool {
        self == TokenState::Active
    }
}

/// Classify a token. Revocation wins over expiry.
pub fn token_state(
    revoked_at: Option<Timestamp>,
    expires_at: Option<Timestamp>,
    now: Timestamp,
) -> TokenState {
    if revoked_at.is_some() {
        return TokenState::Revoked;
    }
    match expires_at {
        Some(expires_at) if expires_at < now => TokenState::Expired,
        _ => TokenState::Active,
    }
}

/// Generate a new random token string.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Compute `expires_at` for a token issued at `now`.
///
/// `None` means the token never expires on its own.
pub fn expiry_from_days(now: Timestamp, days: Option<i64>) -> Result<Option<Timestamp>, CoreError> {
    match days {
        None => Ok(None),
        Some(d) if (1..=MAX_EXPIRY_DAYS).contains(&d) => Ok(Some(now + Duration::days(d))),
        Some(d) => Err(CoreError::Validation(format!(
            "expires_in_days must be between 1 and {MAX_EXPIRY_DAYS}, got {d}"
        ))),
    }
}
