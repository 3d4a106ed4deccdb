//! Repository URL parsing.
//!
//! Two facts are read out of a repository URL: the owner/name pair the
//! provider APIs address repositories by, and the domain label the
//! dispatcher selects the provider with.

use url::Url;

use crate::error::AccessError;

/// Owner/name pair extracted from a repository URL.
///
/// `https://github.com/acme/widget` yields owner `acme`, name `widget`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    owner: String,
    name: String,
}

impl RepoPath {
    /// Parse the last two path segments of a repository URL.
    ///
    /// A trailing `.git` on the repository name is dropped. Extra leading
    /// segments are ignored, so provider URLs with project prefixes still
    /// resolve to their final owner/name pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidRepoUrl`] if the URL does not parse or
    /// has fewer than two path segments.
    pub fn parse(repo_url: &str) -> Result<Self, AccessError> {
        let url = Url::parse(repo_url).map_err(|e| AccessError::InvalidRepoUrl {
            url: repo_url.to_string(),
            reason: e.to_string(),
        })?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [.., owner, name] => Ok(Self {
                owner: (*owner).to_string(),
                name: name.trim_end_matches(".git").to_string(),
            }),
            _ => Err(AccessError::InvalidRepoUrl {
                url: repo_url.to_string(),
                reason: "expected an owner and a repository path segment".to_string(),
            }),
        }
    }

    /// Owning organization (or user) of the repository.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without the owner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name` identifier used by the provider APIs.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Second-level domain label of a repository URL's hostname.
///
/// `https://github.com/acme/widget` yields `github`; a `www.` prefix does
/// not change the answer.
///
/// # Errors
///
/// Returns [`AccessError::InvalidRepoUrl`] if the URL does not parse or has
/// no hostname.
pub fn domain_label(repo_url: &str) -> Result<String, AccessError> {
    let url = Url::parse(repo_url).map_err(|e| AccessError::InvalidRepoUrl {
        url: repo_url.to_string(),
        reason: e.to_string(),
    })?;

    let host = url.host_str().ok_or_else(|| AccessError::InvalidRepoUrl {
        url: repo_url.to_string(),
        reason: "missing hostname".to_string(),
    })?;

    let labels: Vec<&str> = host.split('.').collect();
    let label = match labels.as_slice() {
        [.., second_level, _tld] => second_level,
        [only] => only,
        [] => {
            return Err(AccessError::InvalidRepoUrl {
                url: repo_url.to_string(),
                reason: "empty hostname".to_string(),
            })
        }
    };

    Ok((*label).to_lowercase())
}
