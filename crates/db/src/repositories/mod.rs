//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or a `&mut PgConnection` inside a transaction)
//! as the first argument.

pub mod build_project_repo;
pub mod design_project_repo;
pub mod notification_repo;
pub mod payment_repo;
pub mod project_repo;
pub mod scope_repo;
pub mod submit_token_repo;
pub mod user_repo;
pub mod weekly_accomplishment_repo;

pub use build_project_repo::BuildProjectRepo;
pub use design_project_repo::DesignProjectRepo;
pub use notification_repo::NotificationRepo;
pub use payment_repo::PaymentRepo;
pub use project_repo::ProjectRepo;
pub use scope_repo::ScopeRepo;
pub use submit_token_repo::SubmitTokenRepo;
pub use user_repo::UserRepo;
pub use weekly_accomplishment_repo::WeeklyAccomplishmentRepo;
