//! Bot configuration.

use std::env;

use crate::chat::Identity;

/// Bot configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Administrators notified about access requests, in configured order
    pub admins: Vec<Identity>,
    /// Credential for the hosting-provider API
    pub access_token: String,
    /// Identity the console runner attributes commands to
    pub operator: Identity,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let admins = env::var("GITHUB_ADMINS").map_err(|_| ConfigError::MissingEnvVar("GITHUB_ADMINS"))?;
        let admins = parse_admins(&admins).ok_or(ConfigError::InvalidValue("GITHUB_ADMINS"))?;

        let access_token = env::var("GITHUB_ACCESS_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("GITHUB_ACCESS_TOKEN"))?;

        let operator = env::var("GITBOT_OPERATOR")
            .map(Identity::new)
            .unwrap_or_else(|_| Identity::new("@console"));

        Ok(Self {
            admins,
            access_token,
            operator,
        })
    }
}

/// Split a comma-separated admin list, dropping surrounding whitespace and
/// empty entries. `None` when nothing usable remains.
fn parse_admins(raw: &str) -> Option<Vec<Identity>> {
    let admins: Vec<Identity> = raw
        .split(',')
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .map(Identity::new)
        .collect();

    if admins.is_empty() {
        None
    } else {
        Some(admins)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
