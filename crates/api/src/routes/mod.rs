pub mod auth;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register      register (public)
/// /auth/login         login (public)
///
/// /projects           list, create
/// /projects/{id}      get, update (full replace), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login).
        .nest("/auth", auth::router())
        // Project routes (owner-scoped CRUD).
        .nest("/projects", project::router())
}
