//! Provider half of the gitbot access relay.
//!
//! Turns a validated access request into hosting-provider API calls: a
//! [`ProviderAdapter`] validates the requested access kind, checks that the
//! target user belongs to the repository's organization, and adds the user
//! as a collaborator. The [`Dispatcher`] picks the adapter from the
//! repository URL's domain and constructs it with the configured credential.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitbot_forge::{AccessGranter, AccessKind, Dispatcher};
//!
//! let dispatcher = Dispatcher::new(token);
//! dispatcher
//!     .execute(AccessKind::Push, "https://github.com/acme/widget", "alice")
//!     .await?;
//! ```

pub mod adapter;
pub mod client;
pub mod clients;
pub mod dispatch;
pub mod error;
pub mod repo_url;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use adapter::{BitbucketAdapter, GitHubAdapter, ProviderAdapter};
pub use client::{GitHubApi, GitHubClient};
pub use clients::{OrgsClient, ReposClient, UsersClient};
pub use dispatch::{AccessGranter, Dispatcher, Provider};
pub use error::{AccessError, ApiError};
pub use repo_url::RepoPath;
pub use transport::{HttpTransport, RetryConfig};
pub use types::{AccessKind, Account, Organization, Repository};
