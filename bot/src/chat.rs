//! Chat framework seam.
//!
//! The bot only needs to address peers and send them text; everything else
//! about the chat protocol lives outside this crate.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// A chat identity, e.g. `@maria.lopez`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from its chat handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// The raw chat handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from the chat transport.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to deliver message to {recipient}: {reason}")]
    Delivery { recipient: String, reason: String },
}

/// Outbound message transport, implemented by the hosting chat framework.
#[async_trait]
pub trait Chat: Send + Sync {
    /// Deliver `message` to `to`.
    async fn send(&self, to: &Identity, message: &str) -> Result<(), ChatError>;
}

/// Chat transport that prints to stdout, used by the console runner.
pub struct ConsoleChat;

#[async_trait]
impl Chat for ConsoleChat {
    async fn send(&self, to: &Identity, message: &str) -> Result<(), ChatError> {
        println!("-> {to}: {message}");
        Ok(())
    }
}
