//! Row models and write shapes.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The write shape used for inserts (and, for projects, full replaces)

pub mod project;
pub mod user;
