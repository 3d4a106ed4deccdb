//! Command handlers for the two chat operations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use gitbot_forge::{AccessError, AccessGranter, AccessKind};

use crate::chat::{Chat, Identity};
use crate::commands::COMMAND_PREFIX;
use crate::config::Config;
use crate::error::BotError;
use crate::models::AccessRequest;

/// The two user-facing operations, wired to the configured admin list, the
/// chat transport and the provider dispatcher.
pub struct Handlers {
    admins: Vec<Identity>,
    chat: Arc<dyn Chat>,
    granter: Arc<dyn AccessGranter>,
}

impl Handlers {
    /// Wire the handlers to their collaborators.
    pub fn new(config: &Config, chat: Arc<dyn Chat>, granter: Arc<dyn AccessGranter>) -> Self {
        Self {
            admins: config.admins.clone(),
            chat,
            granter,
        }
    }

    /// Handle the request command: notify the admins with a ready-to-copy
    /// grant command, confirm to the caller.
    pub async fn request(
        &self,
        access: AccessKind,
        url: &str,
        username: &str,
        issuer: &Identity,
    ) -> Result<String, BotError> {
        let request = AccessRequest::requested(access, url, username, issuer.clone());
        debug!(command = "request", %request, "handling chat command");

        let admin_command = format!(
            "{COMMAND_PREFIX} grant {access} --url {url} --username {username}",
            access = request.access,
            url = request.repo_url,
            username = request.username,
        );
        let admin_message = format!("Requested {request} Issued by {issuer}\n{admin_command}");

        self.notify_admins(&admin_message, issuer).await?;
        Ok(format!("Requested {request}"))
    }

    /// Handle the grant command: run the grant against the provider and
    /// report the outcome to the admins.
    ///
    /// A negative membership check is the one expected failure and becomes
    /// a denial notification; every other error propagates to the runner's
    /// generic reporting.
    pub async fn grant(
        &self,
        access: AccessKind,
        url: &str,
        username: &str,
        approver: &Identity,
    ) -> Result<String, BotError> {
        let request = AccessRequest::approved(access, url, username, approver.clone());
        debug!(command = "grant", %request, "handling chat command");

        match self
            .granter
            .execute(request.access, &request.repo_url, &request.username)
            .await
        {
            Ok(()) => {
                info!(%request, approver = %approver, "access granted");
                let message = format!("Granted {request} Approved by admin: {approver}");
                self.notify_admins(&message, approver).await?;
                Ok(message)
            }
            Err(AccessError::NotInOrganization {
                organization,
                username,
            }) => {
                warn!(%organization, %username, "access denied");
                let message = format!(
                    "Git user {username} is not a member of the {organization} organization. \
                     Access grant denied"
                );
                self.notify_admins(&message, approver).await?;
                Ok(message)
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Send `message` to every configured admin except `from`.
    async fn notify_admins(&self, message: &str, from: &Identity) -> Result<(), BotError> {
        for admin in &self.admins {
            if admin != from {
                self.chat.send(admin, message).await?;
            }
        }
        Ok(())
    }
}
