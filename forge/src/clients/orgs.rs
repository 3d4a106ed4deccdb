//! Organization resource client.

use std::sync::Arc;

use reqwest::StatusCode;

use crate::error::ApiError;
use crate::transport::HttpTransport;
use crate::types::Organization;

/// Client for organization operations.
pub struct OrgsClient {
    transport: Arc<HttpTransport>,
}

impl OrgsClient {
    /// Create a new orgs client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch an organization by login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown organization.
    pub async fn get(&self, org: &str) -> Result<Organization, ApiError> {
        self.transport.get_json(&format!("/orgs/{org}")).await
    }

    /// Whether `username` is a member of `org`.
    ///
    /// The membership endpoint answers through its status code: 204 for a
    /// member, 404 for a non-member.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any status other than the two answers.
    pub async fn is_member(&self, org: &str, username: &str) -> Result<bool, ApiError> {
        let status = self
            .transport
            .get_status(
                &format!("/orgs/{org}/members/{username}"),
                &[StatusCode::NOT_FOUND],
            )
            .await?;

        Ok(status == StatusCode::NO_CONTENT)
    }
}
