//! Handlers for the `/projects` resource.
//!
//! Every handler takes the [`AuthUser`] extractor, so requests without a
//! valid token are rejected before any repository call. Lookups are
//! owner-scoped throughout: a project belonging to another user and a
//! project that does not exist produce the same not-found response.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use devtrack_core::error::CoreError;
use devtrack_core::project::{Project, ProjectDraft};
use devtrack_core::types::DbId;
use devtrack_db::models::project::ProjectWrite;
use devtrack_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Acknowledgment body returned by delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    let records = ProjectRepo::list_for_user(&state.pool, user.user_id).await?;
    let projects = records
        .into_iter()
        .map(|record| record.decode())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ProjectDraft>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let Json(draft) = payload
        .map_err(|e| AppError::InternalError(format!("Unreadable request body: {e}")))?;

    let write = ProjectWrite::encode(&draft)?;
    let record = ProjectRepo::create(&state.pool, user.user_id, &write).await?;
    Ok((StatusCode::CREATED, Json(record.decode()?)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let record = ProjectRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(record.decode()?))
}

/// PATCH /api/projects/{id}
///
/// Full-document replace: the body goes through the same defaulting encode
/// as create, so omitted fields reset to their defaults.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    payload: Result<Json<ProjectDraft>, JsonRejection>,
) -> AppResult<Json<Project>> {
    // The ownership check runs before the body is parsed: a foreign or
    // missing id stays a 404 even when the payload is unreadable.
    ProjectRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let Json(draft) = payload
        .map_err(|e| AppError::InternalError(format!("Unreadable request body: {e}")))?;
    let write = ProjectWrite::encode(&draft)?;

    // The row can vanish between the check and the write; that is the same
    // not-found outcome.
    let record = ProjectRepo::update_for_user(&state.pool, id, user.user_id, &write)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(record.decode()?))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = ProjectRepo::delete_for_user(&state.pool, id, user.user_id).await?;
    if deleted {
        Ok(Json(DeleteResponse { ok: true }))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
