//! Provider selection and request execution.
//!
//! Which adapter handles a repository URL is decided by the second-level
//! domain label of the URL's hostname, over a closed set of providers.

use async_trait::async_trait;
use tracing::debug;

use crate::adapter::{BitbucketAdapter, GitHubAdapter, ProviderAdapter};
use crate::error::AccessError;
use crate::repo_url;
use crate::types::AccessKind;

/// Hosting providers gitbot can route requests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    Bitbucket,
}

impl Provider {
    /// Select a provider from a repository URL's domain label (`github`
    /// from `github.com`, `bitbucket` from `bitbucket.org`).
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownProvider`] for a domain outside the
    /// known set, or [`AccessError::InvalidRepoUrl`] if the URL does not
    /// parse.
    pub fn from_repo_url(repo_url: &str) -> Result<Self, AccessError> {
        match repo_url::domain_label(repo_url)?.as_str() {
            "github" => Ok(Self::GitHub),
            "bitbucket" => Ok(Self::Bitbucket),
            _ => Err(AccessError::UnknownProvider(repo_url.to_string())),
        }
    }
}

/// Executes one access request against whichever provider its repository
/// URL belongs to.
///
/// [`Dispatcher`] is the production implementation; handler tests
/// substitute a scripted one.
#[async_trait]
pub trait AccessGranter: Send + Sync {
    /// Grant `kind` access on the repository at `repo_url` to `username`.
    async fn execute(
        &self,
        kind: AccessKind,
        repo_url: &str,
        username: &str,
    ) -> Result<(), AccessError>;
}

/// Selects the provider adapter by URL domain and constructs it with the
/// configured credential.
pub struct Dispatcher {
    token: String,
}

impl Dispatcher {
    /// Create a dispatcher holding the provider credential.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn adapter_for(&self, provider: Provider) -> Result<Box<dyn ProviderAdapter>, AccessError> {
        match provider {
            Provider::GitHub => Ok(Box::new(GitHubAdapter::new(&self.token)?)),
            Provider::Bitbucket => Ok(Box::new(BitbucketAdapter)),
        }
    }
}

#[async_trait]
impl AccessGranter for Dispatcher {
    async fn execute(
        &self,
        kind: AccessKind,
        repo_url: &str,
        username: &str,
    ) -> Result<(), AccessError> {
        let provider = Provider::from_repo_url(repo_url)?;
        debug!(?provider, %repo_url, %username, access = %kind, "dispatching access request");

        let adapter = self.adapter_for(provider)?;
        adapter.execute(kind, repo_url, username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_selection_by_domain() {
        assert_eq!(
            Provider::from_repo_url("https://github.com/acme/widget").unwrap(),
            Provider::GitHub
        );
        assert_eq!(
            Provider::from_repo_url("https://bitbucket.org/acme/widget").unwrap(),
            Provider::Bitbucket
        );
    }

    #[test]
    fn test_unrecognized_domain_is_an_error() {
        let err = Provider::from_repo_url("https://gitlab.com/acme/widget").unwrap_err();
        assert!(matches!(err, AccessError::UnknownProvider(_)));
    }

    #[test]
    fn test_unparseable_url_is_an_error() {
        let err = Provider::from_repo_url("acme/widget").unwrap_err();
        assert!(matches!(err, AccessError::InvalidRepoUrl { .. }));
    }

    #[test]
    fn test_dispatcher_builds_matching_adapter() {
        let dispatcher = Dispatcher::new("test-token");

        let github = dispatcher.adapter_for(Provider::GitHub).unwrap();
        assert_eq!(github.provider_name(), "github");

        let bitbucket = dispatcher.adapter_for(Provider::Bitbucket).unwrap();
        assert_eq!(bitbucket.provider_name(), "bitbucket");
    }

    #[tokio::test]
    async fn test_dispatch_to_unimplemented_provider_fails_clearly() {
        let dispatcher = Dispatcher::new("test-token");

        let err = dispatcher
            .execute(
                AccessKind::Push,
                "https://bitbucket.org/acme/widget",
                "alice",
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AccessError::ProviderNotImplemented {
                provider: "bitbucket"
            }
        ));
    }
}
