//! Types shared across the provider layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission level grantable on a repository.
///
/// The lowercase wire form doubles as the GitHub collaborator `permission`
/// parameter, so no separate mapping is needed when granting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Read access
    Pull,
    /// Write access
    Push,
    /// Administrative access
    Admin,
}

impl AccessKind {
    /// Every kind the chat surface accepts.
    pub const ALL: [AccessKind; 3] = [AccessKind::Pull, AccessKind::Push, AccessKind::Admin];

    /// Lowercase wire form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Push => "push",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pull" => Ok(Self::Pull),
            "push" => Ok(Self::Push),
            "admin" => Ok(Self::Admin),
            other => Err(format!(
                "unknown access kind '{other}' (expected pull, push or admin)"
            )),
        }
    }
}

/// Repository as returned by the provider API.
///
/// Only the fields the relay consumes are deserialized; the provider sends
/// many more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
}

/// User account as returned by the provider API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub login: String,
}

/// Organization as returned by the provider API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub login: String,
    pub description: Option<String>,
}
