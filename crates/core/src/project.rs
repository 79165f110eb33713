//! Wire-facing project types.
//!
//! [`Project`] is the decoded document the API serves and the client
//! caches. [`ProjectDraft`] is the request-body shape shared by create and
//! update: every field is optional, and absent fields take their documented
//! defaults when the draft is encoded for storage. Create and update run
//! through the same defaulting path, so an update that omits a field resets
//! it rather than keeping the stored value.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Project lifecycle status.
///
/// The canonical values are `not-started`, `in-progress` and `completed`.
/// Any other string a client sends is kept verbatim rather than rejected
/// and survives a store/read round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Completed,
    /// Any value outside the canonical set, preserved verbatim.
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Other(value) => value,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl From<String> for ProjectStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "not-started" => Self::NotStarted,
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ProjectStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ProjectStatus> for String {
    fn from(value: ProjectStatus) -> Self {
        match value {
            ProjectStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Project priority.
///
/// Unknown values are preserved verbatim and rank alongside `medium` when
/// sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectPriority {
    High,
    Medium,
    Low,
    /// Any value outside the canonical set, preserved verbatim.
    Other(String),
}

impl ProjectPriority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other(value) => value,
        }
    }

    /// Sort rank: high before medium before low, unrecognized as medium.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium | Self::Other(_) => 1,
            Self::Low => 2,
        }
    }
}

impl Default for ProjectPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl From<String> for ProjectPriority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ProjectPriority {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ProjectPriority> for String {
    fn from(value: ProjectPriority) -> Self {
        match value {
            ProjectPriority::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// A reference link attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLink {
    pub label: String,
    pub url: String,
}

/// A decoded project document as served by the API.
///
/// Sequence fields are never null on the wire: a project without tech
/// entries or links serves empty arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub due_date: Option<Timestamp>,
    pub tech_stack: Vec<String>,
    pub progress: i64,
    pub links: Vec<ProjectLink>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for project create and update.
///
/// `due_date` stays a raw string here; parsing to a timestamp happens when
/// the draft is encoded for storage. `progress` only accepts JSON integers
/// and treats anything else as absent, which stores as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub due_date: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    #[serde(deserialize_with = "progress_if_integer")]
    pub progress: Option<i64>,
    pub links: Option<Vec<ProjectLink>>,
    pub notes: Option<String>,
}

/// Accept only JSON integers for `progress`; strings, floats, booleans and
/// null all behave as if the field were absent.
fn progress_if_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}
