//! Client-resident project cache backed by the HTTP API.
//!
//! Wraps the `/api/projects` endpoints using [`reqwest`] and mirrors the
//! server-side list in memory. The cache changes only from confirmed server
//! responses: a failed mutation returns the error and leaves the local list
//! exactly as it was.

use devtrack_core::project::{Project, ProjectDraft};
use devtrack_core::types::DbId;

/// Errors from the project store's HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Server error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Local mirror of one user's project list.
///
/// The store starts in the loading state with an empty list; call
/// [`ProjectStore::load`] to populate it. A load that fails for any reason
/// (network, auth, bad payload) resolves to an empty list rather than an
/// error, so a rendering caller always has something to show. Mutations do
/// surface their errors.
pub struct ProjectStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
    projects: Vec<Project>,
    loading: bool,
}

impl ProjectStore {
    /// Create a store for the given API base URL and session token.
    ///
    /// * `base_url` - e.g. `http://localhost:3000` (no trailing slash).
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
            projects: Vec::new(),
            loading: true,
        }
    }

    /// The cached project list, newest-first.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// True until the first [`ProjectStore::load`] completes.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the list from the server, replacing the cache.
    ///
    /// Any failure yields an empty list; the loading flag clears either way.
    pub async fn load(&mut self) {
        self.projects = self.fetch_list().await.unwrap_or_default();
        self.loading = false;
    }

    /// Re-fetch the list from the server.
    pub async fn refetch(&mut self) {
        self.load().await;
    }

    /// Create a project on the server and prepend the confirmed record.
    ///
    /// Returns the server-assigned id. The record goes to the front of the
    /// cache because the server lists newest-first.
    pub async fn add_project(&mut self, draft: &ProjectDraft) -> Result<DbId, StoreError> {
        let response = self
            .client
            .post(format!("{}/api/projects", self.base_url))
            .bearer_auth(&self.token)
            .json(draft)
            .send()
            .await?;

        let created: Project = Self::parse_response(response).await?;
        let id = created.id;
        self.projects.insert(0, created);
        Ok(id)
    }

    /// Replace a project on the server and mirror the confirmed record.
    ///
    /// The entry keeps its position in the cached list.
    pub async fn update_project(
        &mut self,
        id: DbId,
        draft: &ProjectDraft,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(format!("{}/api/projects/{id}", self.base_url))
            .bearer_auth(&self.token)
            .json(draft)
            .send()
            .await?;

        let updated: Project = Self::parse_response(response).await?;
        if let Some(slot) = self.projects.iter_mut().find(|p| p.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    /// Delete a project on the server and drop it from the cache.
    pub async fn delete_project(&mut self, id: DbId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(format!("{}/api/projects/{id}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check_status(response).await?;
        self.projects.retain(|p| p.id != id);
        Ok(())
    }

    // ---- private helpers ----

    /// Fetch the full project list.
    async fn fetch_list(&self) -> Result<Vec<Project>, StoreError> {
        let response = self
            .client
            .get(format!("{}/api/projects", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`StoreError::Api`] containing the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), StoreError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
