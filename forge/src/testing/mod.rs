//! Test doubles for the provider layer.

pub mod mock;

pub use mock::{MockCall, MockGitHubApi, MockResponse};
