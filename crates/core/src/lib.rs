//! Domain types and pure logic shared across the devtrack crates.
//!
//! Everything in this crate is I/O-free: the wire-facing project types,
//! the tolerant status/priority enums, the error taxonomy, and the
//! derived-view pipeline the UI runs over a cached project list.

pub mod error;
pub mod project;
pub mod types;
pub mod view;
