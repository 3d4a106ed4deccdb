//! Repository resource client.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::error::ApiError;
use crate::repo_url::RepoPath;
use crate::transport::HttpTransport;
use crate::types::{AccessKind, Repository};

/// Client for repository operations.
pub struct ReposClient {
    transport: Arc<HttpTransport>,
}

impl ReposClient {
    /// Create a new repos client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch a repository by its owner/name identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown repository, or the
    /// transport's error for any other failure.
    pub async fn get(&self, repo: &RepoPath) -> Result<Repository, ApiError> {
        self.transport
            .get_json(&format!("/repos/{}", repo.full_name()))
            .await
    }

    /// Add `username` as a collaborator on `repo` with `permission`.
    ///
    /// The provider answers 201 when an invitation was created and 204 when
    /// the user already had access; both count as success.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the provider rejects the call.
    pub async fn add_collaborator(
        &self,
        repo: &RepoPath,
        username: &str,
        permission: AccessKind,
    ) -> Result<(), ApiError> {
        let body = json!({ "permission": permission.as_str() });
        let status = self
            .transport
            .put_json(
                &format!("/repos/{}/collaborators/{username}", repo.full_name()),
                &body,
            )
            .await?;

        debug!(
            repo = %repo.full_name(),
            %username,
            permission = %permission,
            status = status.as_u16(),
            "collaborator added"
        );
        Ok(())
    }
}
