//! Repository for the `projects` table.

use devtrack_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::project::{ProjectRecord, ProjectWrite};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, status, priority, due_date, \
                       tech_stack, progress, links, notes, created_at";

/// Provides owner-scoped CRUD operations for projects.
///
/// Every per-item query filters by both project id and owner id, so a
/// project belonging to someone else produces the same non-result as a
/// missing one.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        user_id: DbId,
        input: &ProjectWrite,
    ) -> Result<ProjectRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, name, description, status, priority, due_date,
                                   tech_stack, progress, links, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.tech_stack)
            .bind(input.progress)
            .bind(&input.links)
            .bind(&input.notes)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List the caller's projects, most recently created first.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: DbId,
    ) -> Result<Vec<ProjectRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE user_id = ? ORDER BY created_at DESC");
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a project by id, scoped to its owner.
    pub async fn find_for_user(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ? AND user_id = ?");
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fully replace a project's client-writable fields, scoped to its
    /// owner. `id`, `user_id` and `created_at` never change.
    ///
    /// Returns `None` if the row does not exist or belongs to someone else.
    pub async fn update_for_user(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
        input: &ProjectWrite,
    ) -> Result<Option<ProjectRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = ?, description = ?, status = ?, priority = ?, due_date = ?,
                tech_stack = ?, progress = ?, links = ?, notes = ?
             WHERE id = ? AND user_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.tech_stack)
            .bind(input.progress)
            .bind(&input.links)
            .bind(&input.notes)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project, scoped to its owner. Returns `true` if a row was
    /// removed.
    pub async fn delete_for_user(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
