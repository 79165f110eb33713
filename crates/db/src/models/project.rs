//! Project row model and the storage serialization layer.
//!
//! `encode` turns a request draft into column values, applying the shared
//! defaulting rules; `decode` unpacks a row into the wire document. Create
//! and update both encode through the same path, which is what makes
//! update a full-document replace rather than a partial patch.

use devtrack_core::error::CoreError;
use devtrack_core::project::{Project, ProjectDraft, ProjectLink, ProjectPriority, ProjectStatus};
use devtrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `tech_stack` and `links` hold JSON text blobs, NULL when the list is
/// empty. This layer is the only writer of those columns, so a blob that
/// fails to parse on the way out is an integrity error, not client input.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub tech_stack: Option<String>,
    pub progress: i64,
    pub links: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl ProjectRecord {
    /// Unpack the row into the wire document. NULL blobs decode to empty
    /// vectors, never null.
    pub fn decode(self) -> Result<Project, CoreError> {
        let tech_stack: Vec<String> = match &self.tech_stack {
            Some(blob) => from_blob(blob, "tech_stack", self.id)?,
            None => Vec::new(),
        };
        let links: Vec<ProjectLink> = match &self.links {
            Some(blob) => from_blob(blob, "links", self.id)?,
            None => Vec::new(),
        };

        Ok(Project {
            id: self.id,
            name: self.name,
            description: self.description,
            status: ProjectStatus::from(self.status),
            priority: ProjectPriority::from(self.priority),
            due_date: self.due_date,
            tech_stack,
            progress: self.progress,
            links,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// Encoded column values for inserting or fully replacing a project row.
#[derive(Debug, Clone)]
pub struct ProjectWrite {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub tech_stack: Option<String>,
    pub progress: i64,
    pub links: Option<String>,
    pub notes: Option<String>,
}

impl ProjectWrite {
    /// Apply the defaulting rules and pack sequence fields into JSON blobs.
    ///
    /// - absent or empty `name` becomes `"Untitled"`
    /// - absent or empty optional text becomes NULL
    /// - empty and absent sequences both encode to NULL, never `"[]"`
    /// - link entries whose `url` is blank after trimming are dropped
    /// - `due_date` accepts RFC 3339 or bare `YYYY-MM-DD` (midnight UTC)
    pub fn encode(draft: &ProjectDraft) -> Result<Self, CoreError> {
        let tech_stack = match draft.tech_stack.as_deref() {
            Some(entries) if !entries.is_empty() => Some(to_blob(entries)?),
            _ => None,
        };

        let links: Vec<ProjectLink> = draft
            .links
            .clone()
            .unwrap_or_default()
            .into_iter()
            .filter(|link| !link.url.trim().is_empty())
            .collect();
        let links = if links.is_empty() {
            None
        } else {
            Some(to_blob(&links)?)
        };

        Ok(Self {
            name: non_empty(draft.name.clone()).unwrap_or_else(|| "Untitled".to_owned()),
            description: non_empty(draft.description.clone()),
            status: draft.status.clone().unwrap_or_default().as_str().to_owned(),
            priority: draft.priority.clone().unwrap_or_default().as_str().to_owned(),
            due_date: parse_due_date(draft.due_date.as_deref())?,
            tech_stack,
            progress: draft.progress.unwrap_or(0),
            links,
            notes: non_empty(draft.notes.clone()),
        })
    }
}

// Empty strings behave as absent, mirroring the falsy checks the web UI
// relies on when it submits form state.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accept an RFC 3339 date-time or a bare `YYYY-MM-DD` date (midnight UTC).
/// An unparseable non-empty value is a malformed body, surfaced as a 500.
fn parse_due_date(input: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    let raw = match input {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&chrono::Utc)));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.and_time(chrono::NaiveTime::MIN).and_utc()));
    }
    Err(CoreError::Internal(format!("unparseable due date: {raw}")))
}

fn to_blob<T: serde::Serialize>(values: &[T]) -> Result<String, CoreError> {
    serde_json::to_string(values)
        .map_err(|e| CoreError::Internal(format!("failed to serialize sequence field: {e}")))
}

fn from_blob<T: serde::de::DeserializeOwned>(
    blob: &str,
    column: &str,
    id: DbId,
) -> Result<Vec<T>, CoreError> {
    serde_json::from_str(blob)
        .map_err(|e| CoreError::Internal(format!("corrupt {column} blob on project {id}: {e}")))
}
