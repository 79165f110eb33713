//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Project queries are
//! owner-scoped: lookups filter by `(id, user_id)` so a foreign project
//! and a missing project are the same non-result.

pub mod project_repo;
pub mod user_repo;

pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
