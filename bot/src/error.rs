//! Bot-level error type.

use thiserror::Error;

use gitbot_forge::AccessError;

use crate::chat::ChatError;

/// Errors a command handler can surface to the runner.
///
/// Whatever reaches the runner is reported back to the caller as a generic
/// command failure; only the organization-membership denial is handled
/// before getting here.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}
