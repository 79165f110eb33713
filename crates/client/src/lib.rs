//! Client-side data layer for the project tracker.
//!
//! [`store::ProjectStore`] keeps a local mirror of the caller's project list
//! and applies mutations to it only after the server confirms them.

pub mod store;
