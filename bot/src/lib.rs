//! gitbot - chat-operated repository access relay.
//!
//! A user asks for collaborator access with `!gitbot request`; every
//! configured administrator gets a notification carrying a copy-pasteable
//! grant command; `!gitbot grant` runs the grant through the provider
//! adapters in [`gitbot_forge`] and reports the outcome back.

pub mod chat;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod testing;

pub use chat::{Chat, ChatError, ConsoleChat, Identity};
pub use commands::{AccessArgs, Action, GitbotCommand, COMMAND_PREFIX};
pub use config::{Config, ConfigError};
pub use error::BotError;
pub use handlers::Handlers;
pub use models::AccessRequest;
