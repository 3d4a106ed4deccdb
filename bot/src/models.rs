//! Request model for the chat commands.

use std::fmt;

use gitbot_forge::AccessKind;

use crate::chat::Identity;

/// One user-raised access request, alive for the duration of a single chat
/// command and never persisted.
#[derive(Debug, Clone)]
pub struct AccessRequest {
    pub access: AccessKind,
    pub repo_url: String,
    pub username: String,
    /// Who raised the request (request command)
    pub issuer: Option<Identity>,
    /// Which admin approved it (grant command)
    pub approver: Option<Identity>,
}

impl AccessRequest {
    /// Request raised by `issuer` through the request command.
    pub fn requested(
        access: AccessKind,
        repo_url: impl Into<String>,
        username: impl Into<String>,
        issuer: Identity,
    ) -> Self {
        Self {
            access,
            repo_url: repo_url.into(),
            username: username.into(),
            issuer: Some(issuer),
            approver: None,
        }
    }

    /// Request approved by `approver` through the grant command.
    pub fn approved(
        access: AccessKind,
        repo_url: impl Into<String>,
        username: impl Into<String>,
        approver: Identity,
    ) -> Self {
        Self {
            access,
            repo_url: repo_url.into(),
            username: username.into(),
            issuer: None,
            approver: Some(approver),
        }
    }
}

impl fmt::Display for AccessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Access for git user {} on repo {}.",
            self.access, self.username, self.repo_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let request = AccessRequest::requested(
            AccessKind::Push,
            "https://github.com/acme/widget",
            "alice",
            Identity::new("@admin2"),
        );

        assert_eq!(
            request.to_string(),
            "push Access for git user alice on repo https://github.com/acme/widget."
        );
    }

    #[test]
    fn test_constructors_set_one_side_only() {
        let requested = AccessRequest::requested(
            AccessKind::Pull,
            "https://github.com/acme/widget",
            "alice",
            Identity::new("@user"),
        );
        assert!(requested.issuer.is_some());
        assert!(requested.approver.is_none());

        let approved = AccessRequest::approved(
            AccessKind::Pull,
            "https://github.com/acme/widget",
            "alice",
            Identity::new("@admin"),
        );
        assert!(approved.issuer.is_none());
        assert!(approved.approver.is_some());
    }
}
