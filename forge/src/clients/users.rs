//! User resource client.

use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::HttpTransport;
use crate::types::Account;

/// Client for user account operations.
pub struct UsersClient {
    transport: Arc<HttpTransport>,
}

impl UsersClient {
    /// Create a new users client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch a user account by login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown account.
    pub async fn get(&self, username: &str) -> Result<Account, ApiError> {
        self.transport.get_json(&format!("/users/{username}")).await
    }
}
