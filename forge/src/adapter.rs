//! Provider adapters.
//!
//! A [`ProviderAdapter`] turns one access request into provider API calls:
//! validate the requested kind, resolve the repository URL, check that the
//! target user belongs to the owning organization, then add the
//! collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::client::{GitHubApi, GitHubClient};
use crate::error::{AccessError, ApiError};
use crate::repo_url::RepoPath;
use crate::types::AccessKind;

/// Capability set shared by every hosting provider.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider name used in error messages and logs.
    fn provider_name(&self) -> &'static str;

    /// Access kinds this provider understands.
    fn supported_access_kinds(&self) -> &[AccessKind];

    /// Whether `kind` is in the provider's supported set.
    fn is_valid_access_kind(&self, kind: AccessKind) -> bool {
        self.supported_access_kinds().contains(&kind)
    }

    /// Add `username` as a collaborator on `repo` with permission `kind`.
    ///
    /// # Errors
    ///
    /// Provider API failures propagate as [`AccessError::Api`].
    async fn grant_access(
        &self,
        kind: AccessKind,
        repo: &RepoPath,
        username: &str,
    ) -> Result<(), AccessError>;

    /// Whether `username` belongs to `organization` on this provider.
    async fn is_user_in_organization(
        &self,
        organization: &str,
        username: &str,
    ) -> Result<bool, AccessError>;

    /// Validate the kind, check membership, then grant.
    ///
    /// The membership check and the grant are two separate provider calls;
    /// a grant can race a concurrent membership change.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnsupportedAccessKind`] if the kind is outside the
    /// provider's set, [`AccessError::NotInOrganization`] if the membership
    /// check comes back negative; in both cases the grant is never
    /// attempted.
    async fn execute(
        &self,
        kind: AccessKind,
        repo_url: &str,
        username: &str,
    ) -> Result<(), AccessError> {
        if !self.is_valid_access_kind(kind) {
            return Err(AccessError::UnsupportedAccessKind {
                provider: self.provider_name(),
                kind,
            });
        }

        let repo = RepoPath::parse(repo_url)?;
        if !self.is_user_in_organization(repo.owner(), username).await? {
            return Err(AccessError::NotInOrganization {
                organization: repo.owner().to_string(),
                username: username.to_string(),
            });
        }

        self.grant_access(kind, &repo, username).await
    }
}

/// Adapter for github.com repositories.
pub struct GitHubAdapter {
    api: Arc<dyn GitHubApi>,
}

impl GitHubAdapter {
    const SUPPORTED: [AccessKind; 3] = [AccessKind::Pull, AccessKind::Push, AccessKind::Admin];

    /// Build an adapter talking to the real GitHub API with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Ok(Self {
            api: Arc::new(GitHubClient::new(token)?),
        })
    }

    /// Build an adapter over an existing API implementation.
    pub fn with_api(api: Arc<dyn GitHubApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProviderAdapter for GitHubAdapter {
    fn provider_name(&self) -> &'static str {
        "github"
    }

    fn supported_access_kinds(&self) -> &[AccessKind] {
        &Self::SUPPORTED
    }

    async fn grant_access(
        &self,
        kind: AccessKind,
        repo: &RepoPath,
        username: &str,
    ) -> Result<(), AccessError> {
        self.api.get_repository(repo).await?;
        self.api.add_collaborator(repo, username, kind).await?;

        info!(
            repo = %repo.full_name(),
            %username,
            access = %kind,
            "granted collaborator access"
        );
        Ok(())
    }

    async fn is_user_in_organization(
        &self,
        organization: &str,
        username: &str,
    ) -> Result<bool, AccessError> {
        // Resolve both ends first so an unknown user or organization shows
        // up as the provider's own error, not as a membership miss.
        self.api.get_user(username).await?;
        self.api.get_organization(organization).await?;

        let member = self
            .api
            .is_organization_member(organization, username)
            .await?;
        debug!(%organization, %username, member, "membership check");
        Ok(member)
    }
}

/// Placeholder adapter for bitbucket.org repositories.
///
/// Every operation fails with [`AccessError::ProviderNotImplemented`].
pub struct BitbucketAdapter;

#[async_trait]
impl ProviderAdapter for BitbucketAdapter {
    fn provider_name(&self) -> &'static str {
        "bitbucket"
    }

    fn supported_access_kinds(&self) -> &[AccessKind] {
        &[]
    }

    async fn grant_access(
        &self,
        _kind: AccessKind,
        _repo: &RepoPath,
        _username: &str,
    ) -> Result<(), AccessError> {
        Err(AccessError::ProviderNotImplemented {
            provider: self.provider_name(),
        })
    }

    async fn is_user_in_organization(
        &self,
        _organization: &str,
        _username: &str,
    ) -> Result<bool, AccessError> {
        Err(AccessError::ProviderNotImplemented {
            provider: self.provider_name(),
        })
    }

    async fn execute(
        &self,
        _kind: AccessKind,
        _repo_url: &str,
        _username: &str,
    ) -> Result<(), AccessError> {
        Err(AccessError::ProviderNotImplemented {
            provider: self.provider_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::testing::{MockGitHubApi, MockResponse};

    const REPO_URL: &str = "https://github.com/acme/widget";

    #[tokio::test]
    async fn test_execute_grants_after_membership_check() {
        let api = Arc::new(MockGitHubApi::new());
        let adapter = GitHubAdapter::with_api(api.clone());

        adapter
            .execute(AccessKind::Push, REPO_URL, "alice")
            .await
            .expect("grant should succeed");

        assert_eq!(api.call_count("repos.add_collaborator"), 1);
        let calls = api.calls_for("repos.add_collaborator");
        assert_eq!(calls[0].args, vec!["acme/widget", "alice", "push"]);
        assert!(api.was_called("orgs.is_member"));
        assert!(api.was_called("repos.get"));
    }

    #[tokio::test]
    async fn test_execute_rejects_non_member() {
        let api = Arc::new(MockGitHubApi::new());
        api.configure_membership(MockResponse::with_data(false));
        let adapter = GitHubAdapter::with_api(api.clone());

        let err = adapter
            .execute(AccessKind::Push, REPO_URL, "alice")
            .await
            .unwrap_err();

        match err {
            AccessError::NotInOrganization {
                organization,
                username,
            } => {
                assert_eq!(organization, "acme");
                assert_eq!(username, "alice");
            }
            other => panic!("expected NotInOrganization, got {other:?}"),
        }
        assert!(!api.was_called("repos.add_collaborator"));
    }

    #[tokio::test]
    async fn test_execute_propagates_provider_errors() {
        let api = Arc::new(MockGitHubApi::new());
        api.configure_user(MockResponse::with_error(ApiError::NotFound {
            message: "no such user".to_string(),
        }));
        let adapter = GitHubAdapter::with_api(api.clone());

        let err = adapter
            .execute(AccessKind::Pull, REPO_URL, "ghost")
            .await
            .unwrap_err();

        assert!(matches!(err, AccessError::Api(ApiError::NotFound { .. })));
        assert!(!api.was_called("repos.add_collaborator"));
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_url_before_any_call() {
        let api = Arc::new(MockGitHubApi::new());
        let adapter = GitHubAdapter::with_api(api.clone());

        let err = adapter
            .execute(AccessKind::Push, "not a url", "alice")
            .await
            .unwrap_err();

        assert!(matches!(err, AccessError::InvalidRepoUrl { .. }));
        assert!(!api.was_called("users.get"));
        assert!(!api.was_called("repos.add_collaborator"));
    }

    #[test]
    fn test_github_supports_all_kinds() {
        let adapter = GitHubAdapter::with_api(Arc::new(MockGitHubApi::new()));

        for kind in AccessKind::ALL {
            assert!(adapter.is_valid_access_kind(kind));
        }
    }

    #[tokio::test]
    async fn test_bitbucket_operations_not_implemented() {
        let adapter = BitbucketAdapter;

        assert!(adapter.supported_access_kinds().is_empty());
        let err = adapter
            .execute(AccessKind::Push, "https://bitbucket.org/acme/widget", "alice")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccessError::ProviderNotImplemented {
                provider: "bitbucket"
            }
        ));
    }

    /// Adapter with a restricted kind set, for exercising the validation
    /// gate in the shared `execute` flow.
    struct PullOnlyAdapter {
        grants: Mutex<u32>,
    }

    #[async_trait]
    impl ProviderAdapter for PullOnlyAdapter {
        fn provider_name(&self) -> &'static str {
            "pull-only"
        }

        fn supported_access_kinds(&self) -> &[AccessKind] {
            &[AccessKind::Pull]
        }

        async fn grant_access(
            &self,
            _kind: AccessKind,
            _repo: &RepoPath,
            _username: &str,
        ) -> Result<(), AccessError> {
            *self.grants.lock().unwrap() += 1;
            Ok(())
        }

        async fn is_user_in_organization(
            &self,
            _organization: &str,
            _username: &str,
        ) -> Result<bool, AccessError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_execute_rejects_unsupported_kind_without_granting() {
        let adapter = PullOnlyAdapter {
            grants: Mutex::new(0),
        };

        let err = adapter
            .execute(AccessKind::Push, REPO_URL, "alice")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AccessError::UnsupportedAccessKind {
                kind: AccessKind::Push,
                ..
            }
        ));
        assert_eq!(*adapter.grants.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_execute_grants_supported_kind_exactly_once() {
        let adapter = PullOnlyAdapter {
            grants: Mutex::new(0),
        };

        adapter
            .execute(AccessKind::Pull, REPO_URL, "alice")
            .await
            .expect("grant should succeed");

        assert_eq!(*adapter.grants.lock().unwrap(), 1);
    }
}
