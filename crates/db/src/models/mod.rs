//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod build_project;
pub mod design_project;
pub mod notification;
pub mod payment;
pub mod project;
pub mod scope;
pub mod submit_token;
pub mod user;
pub mod weekly_accomplishment;
