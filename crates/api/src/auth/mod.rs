//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and issuance, used by
//!   operator tooling and tests; there is no login endpoint).

pub mod jwt;
