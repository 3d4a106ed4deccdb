//! Error types for the provider layer.

use thiserror::Error;

use crate::types::AccessKind;

/// Failures surfaced while relaying an access request to a hosting
/// provider.
///
/// Only [`AccessError::NotInOrganization`] gets bespoke handling upstream;
/// everything else is reported through the generic command-failure path.
#[derive(Error, Debug, Clone)]
pub enum AccessError {
    /// The requested access kind is outside the provider's supported set.
    #[error("{provider} does not support {kind} access")]
    UnsupportedAccessKind {
        provider: &'static str,
        kind: AccessKind,
    },

    /// The organization membership check came back negative.
    #[error("git user {username} is not a member of the {organization} organization")]
    NotInOrganization {
        organization: String,
        username: String,
    },

    /// The repository URL's domain matches no known provider.
    #[error("no provider registered for repository URL {0}")]
    UnknownProvider(String),

    /// The repository URL could not be parsed into an owner/name pair.
    #[error("invalid repository URL {url}: {reason}")]
    InvalidRepoUrl { url: String, reason: String },

    /// The selected provider is a placeholder without an implementation.
    #[error("{provider} support is not implemented")]
    ProviderNotImplemented { provider: &'static str },

    /// Provider API failure, relayed unmodified.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Typed failures from a provider's REST API.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Bad or expired credential (401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The credential lacks the needed scope, or access is blocked (403).
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// Unknown repository, user or organization (404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The provider rejected the request payload (422).
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Rate limited (429).
    #[error("rate limited: {message} (retry after {retry_after}s)")]
    RateLimited { message: String, retry_after: u32 },

    /// Provider-side failure (5xx).
    #[error("server error ({status}): {message}")]
    Server { message: String, status: u16 },

    /// Transport-level failure before a status code was available.
    #[error("http error: {0}")]
    Http(String),
}

impl ApiError {
    /// Whether retrying the request could change the outcome.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// The provider-suggested delay for rate-limited requests.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_retryable() {
        let error = ApiError::RateLimited {
            message: "API rate limit exceeded".to_string(),
            retry_after: 30,
        };

        assert!(error.is_retryable());
        assert_eq!(error.retry_after(), Some(30));
    }

    #[test]
    fn test_server_error_is_retryable() {
        let error = ApiError::Server {
            message: "internal error".to_string(),
            status: 502,
        };

        assert!(error.is_retryable());
        assert_eq!(error.retry_after(), None);
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let auth = ApiError::Authentication {
            message: "bad credentials".to_string(),
        };
        assert!(!auth.is_retryable());

        let not_found = ApiError::NotFound {
            message: "repository not found".to_string(),
        };
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_access_error_wraps_api_error() {
        let error: AccessError = ApiError::NotFound {
            message: "no such org".to_string(),
        }
        .into();

        assert!(matches!(error, AccessError::Api(ApiError::NotFound { .. })));
    }
}
