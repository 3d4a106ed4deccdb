//! Mock GitHub API for testing.
//!
//! Provides a [`MockGitHubApi`] that implements [`GitHubApi`] with
//! configurable responses and call recording, so adapter and handler tests
//! never touch the network.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::client::GitHubApi;
use crate::error::ApiError;
use crate::repo_url::RepoPath;
use crate::types::{AccessKind, Account, Organization, Repository};

/// Record of a method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g., "repos.get", "orgs.is_member")
    pub method: String,
    /// Arguments passed to the method
    pub args: Vec<String>,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse<T: Clone> {
    /// The data to return instead of the built-in default
    pub data: Option<T>,
    /// Error to return instead of any data
    pub error: Option<ApiError>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl<T: Clone> Default for MockResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            call_count: 0,
        }
    }
}

impl<T: Clone> MockResponse<T> {
    /// Create a new mock response with data.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            call_count: 0,
        }
    }

    /// Create a new mock response with an error.
    pub fn with_error(error: ApiError) -> Self {
        Self {
            data: None,
            error: Some(error),
            call_count: 0,
        }
    }

    /// Get the result, returning either the configured data or error.
    fn get_result(&mut self, default: T) -> Result<T, ApiError> {
        self.call_count += 1;
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

/// Mock implementation of [`GitHubApi`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use gitbot_forge::testing::{MockGitHubApi, MockResponse};
/// use gitbot_forge::{AccessKind, GitHubAdapter, ProviderAdapter};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let api = Arc::new(MockGitHubApi::new());
/// api.configure_membership(MockResponse::with_data(false));
///
/// let adapter = GitHubAdapter::with_api(api.clone());
/// let result = adapter
///     .execute(AccessKind::Push, "https://github.com/acme/widget", "alice")
///     .await;
///
/// assert!(result.is_err());
/// assert!(!api.was_called("repos.add_collaborator"));
/// # });
/// ```
#[derive(Default)]
pub struct MockGitHubApi {
    calls: Mutex<Vec<MockCall>>,
    repository: Mutex<MockResponse<Repository>>,
    collaborator: Mutex<MockResponse<()>>,
    user: Mutex<MockResponse<Account>>,
    organization: Mutex<MockResponse<Organization>>,
    membership: Mutex<MockResponse<bool>>,
}

impl MockGitHubApi {
    /// Create a new mock with default (successful, member) responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response for `get_repository` calls.
    pub fn configure_repository(&self, response: MockResponse<Repository>) {
        *self.repository.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `add_collaborator` calls.
    pub fn configure_collaborator(&self, response: MockResponse<()>) {
        *self.collaborator.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `get_user` calls.
    pub fn configure_user(&self, response: MockResponse<Account>) {
        *self.user.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `get_organization` calls.
    pub fn configure_organization(&self, response: MockResponse<Organization>) {
        *self.organization.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `is_organization_member` calls.
    pub fn configure_membership(&self, response: MockResponse<bool>) {
        *self.membership.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(MockCall::new(method, args));
    }

    /// Check if a method was called.
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|call| call.method == method)
    }

    /// Get the number of times a method was called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Get the recorded calls for a method, in order.
    #[must_use]
    pub fn calls_for(&self, method: &str) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| call.method == method)
            .cloned()
            .collect()
    }

    /// Reset all recorded calls.
    pub fn reset(&self) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[async_trait]
impl GitHubApi for MockGitHubApi {
    async fn get_repository(&self, repo: &RepoPath) -> Result<Repository, ApiError> {
        self.record_call("repos.get", vec![repo.full_name()]);

        let default = Repository {
            id: 1,
            name: repo.name().to_string(),
            full_name: repo.full_name(),
            private: false,
            html_url: format!("https://github.com/{}", repo.full_name()),
            created_at: Utc::now(),
        };

        self.repository
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }

    async fn add_collaborator(
        &self,
        repo: &RepoPath,
        username: &str,
        permission: AccessKind,
    ) -> Result<(), ApiError> {
        self.record_call(
            "repos.add_collaborator",
            vec![
                repo.full_name(),
                username.to_string(),
                permission.to_string(),
            ],
        );

        self.collaborator
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(())
    }

    async fn get_user(&self, username: &str) -> Result<Account, ApiError> {
        self.record_call("users.get", vec![username.to_string()]);

        let default = Account {
            id: 1,
            login: username.to_string(),
        };

        self.user
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }

    async fn get_organization(&self, org: &str) -> Result<Organization, ApiError> {
        self.record_call("orgs.get", vec![org.to_string()]);

        let default = Organization {
            id: 1,
            login: org.to_string(),
            description: None,
        };

        self.organization
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }

    async fn is_organization_member(&self, org: &str, username: &str) -> Result<bool, ApiError> {
        self.record_call(
            "orgs.is_member",
            vec![org.to_string(), username.to_string()],
        );

        self.membership
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoPath {
        RepoPath::parse("https://github.com/acme/widget").unwrap()
    }

    #[tokio::test]
    async fn test_mock_defaults_echo_arguments() {
        let mock = MockGitHubApi::new();

        let repository = mock.get_repository(&repo()).await.unwrap();
        assert_eq!(repository.full_name, "acme/widget");

        let user = mock.get_user("alice").await.unwrap();
        assert_eq!(user.login, "alice");

        assert!(mock.is_organization_member("acme", "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_configured_data() {
        let mock = MockGitHubApi::new();
        mock.configure_membership(MockResponse::with_data(false));

        assert!(!mock.is_organization_member("acme", "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_configured_error() {
        let mock = MockGitHubApi::new();
        mock.configure_repository(MockResponse::with_error(ApiError::NotFound {
            message: "repository not found".to_string(),
        }));

        let result = mock.get_repository(&repo()).await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockGitHubApi::new();

        mock.get_user("alice").await.unwrap();
        mock.get_user("bob").await.unwrap();
        mock.is_organization_member("acme", "alice").await.unwrap();

        assert_eq!(mock.call_count("users.get"), 2);
        assert_eq!(mock.calls_for("users.get")[1].args, vec!["bob"]);
        assert!(mock.was_called("orgs.is_member"));

        mock.reset();
        assert!(!mock.was_called("users.get"));
    }
}
