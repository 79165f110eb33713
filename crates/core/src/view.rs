//! Derived view over a cached project list.
//!
//! The UI recomputes this pipeline on every filter or sort change: narrow
//! by status and tech substring, then apply a single stable sort. Pure
//! functions only; nothing here touches the network or the store.

use std::collections::BTreeSet;

use crate::project::{Project, ProjectStatus};
use crate::types::Timestamp;

/// Sort orders offered by the project list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Latest due date first; projects without a due date sort last.
    #[default]
    DueDateDesc,
    /// Earliest due date first; projects without a due date sort first.
    DueDateAsc,
    /// Case-insensitive name, ascending.
    Name,
    /// High, then medium (including unrecognized priorities), then low.
    Priority,
}

/// Filter and sort selections for the project list view.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Keep only projects with exactly this status. `None` keeps all.
    pub status: Option<ProjectStatus>,
    /// Keep only projects where some tech entry contains this substring,
    /// case-insensitively. `None` or empty keeps all.
    pub tech: Option<String>,
    pub sort: SortOrder,
}

// Missing due dates sort as the epoch.
fn due_key(project: &Project) -> Timestamp {
    project.due_date.unwrap_or(chrono::DateTime::UNIX_EPOCH)
}

/// Apply the filters, then the selected sort, returning a new list.
///
/// Sorting is stable: projects with equal keys keep their relative order
/// from the input.
pub fn derive_view(projects: &[Project], options: &ViewOptions) -> Vec<Project> {
    let needle = options
        .tech
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<Project> = projects
        .iter()
        .filter(|p| match &options.status {
            Some(status) => p.status == *status,
            None => true,
        })
        .filter(|p| match &needle {
            Some(needle) => p
                .tech_stack
                .iter()
                .any(|tech| tech.to_lowercase().contains(needle)),
            None => true,
        })
        .cloned()
        .collect();

    match options.sort {
        SortOrder::DueDateDesc => filtered.sort_by(|a, b| due_key(b).cmp(&due_key(a))),
        SortOrder::DueDateAsc => filtered.sort_by(|a, b| due_key(a).cmp(&due_key(b))),
        SortOrder::Name => {
            filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortOrder::Priority => filtered.sort_by_key(|p| p.priority.rank()),
    }

    filtered
}

/// Distinct tech entries across all projects (pre-filter), ascending.
///
/// Deduplication is exact-string: "Go" and "go" are separate entries, and
/// the ascending sort is by byte order.
pub fn tech_stack_universe(projects: &[Project]) -> Vec<String> {
    let entries: BTreeSet<&str> = projects
        .iter()
        .flat_map(|p| p.tech_stack.iter())
        .map(String::as_str)
        .collect();
    entries.into_iter().map(str::to_owned).collect()
}
