//! GitHub API client.
//!
//! Aggregates the resource clients over one shared transport and exposes
//! them behind the [`GitHubApi`] seam the adapter consumes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::{OrgsClient, ReposClient, UsersClient};
use crate::error::ApiError;
use crate::repo_url::RepoPath;
use crate::transport::{HttpTransport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::types::{AccessKind, Account, Organization, Repository};

/// The provider API operations the GitHub adapter consumes.
///
/// [`GitHubClient`] is the production implementation;
/// [`crate::testing::MockGitHubApi`] substitutes for it in tests.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetch a repository by its owner/name identifier.
    async fn get_repository(&self, repo: &RepoPath) -> Result<Repository, ApiError>;

    /// Add `username` as a collaborator with `permission`.
    async fn add_collaborator(
        &self,
        repo: &RepoPath,
        username: &str,
        permission: AccessKind,
    ) -> Result<(), ApiError>;

    /// Fetch a user account by login.
    async fn get_user(&self, username: &str) -> Result<Account, ApiError>;

    /// Fetch an organization by login.
    async fn get_organization(&self, org: &str) -> Result<Organization, ApiError>;

    /// Whether `username` is a member of `org`.
    async fn is_organization_member(&self, org: &str, username: &str) -> Result<bool, ApiError>;
}

/// Client for the GitHub REST API.
pub struct GitHubClient {
    repos: ReposClient,
    orgs: OrgsClient,
    users: UsersClient,
    transport: Arc<HttpTransport>,
}

impl GitHubClient {
    /// Create a client authenticating with `token` against the public
    /// GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Create a client against a non-default API root (e.g. a GitHub
    /// Enterprise installation).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(
            base_url,
            token,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            None,
        )?);

        Ok(Self {
            repos: ReposClient::new(Arc::clone(&transport)),
            orgs: OrgsClient::new(Arc::clone(&transport)),
            users: UsersClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Get the repos client.
    #[must_use]
    pub fn repos(&self) -> &ReposClient {
        &self.repos
    }

    /// Get the orgs client.
    #[must_use]
    pub fn orgs(&self) -> &OrgsClient {
        &self.orgs
    }

    /// Get the users client.
    #[must_use]
    pub fn users(&self) -> &UsersClient {
        &self.users
    }

    /// Get the underlying HTTP transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_repository(&self, repo: &RepoPath) -> Result<Repository, ApiError> {
        self.repos.get(repo).await
    }

    async fn add_collaborator(
        &self,
        repo: &RepoPath,
        username: &str,
        permission: AccessKind,
    ) -> Result<(), ApiError> {
        self.repos.add_collaborator(repo, username, permission).await
    }

    async fn get_user(&self, username: &str) -> Result<Account, ApiError> {
        self.users.get(username).await
    }

    async fn get_organization(&self, org: &str) -> Result<Organization, ApiError> {
        self.orgs.get(org).await
    }

    async fn is_organization_member(&self, org: &str, username: &str) -> Result<bool, ApiError> {
        self.orgs.is_member(org, username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GitHubClient::new("test-token").expect("client creation should succeed");

        assert_eq!(client.transport().base_url(), "https://api.github.com");
    }

    #[test]
    fn test_client_with_custom_base_url() {
        let client = GitHubClient::with_base_url("https://github.example.com/api/v3", "test-token")
            .expect("client creation should succeed");

        assert_eq!(
            client.transport().base_url(),
            "https://github.example.com/api/v3"
        );
    }
}
