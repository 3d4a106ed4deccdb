//! Test doubles for the chat and provider seams.

use std::sync::Mutex;

use async_trait::async_trait;

use gitbot_forge::{AccessError, AccessGranter, AccessKind};

use crate::chat::{Chat, ChatError, Identity};

/// Chat transport that records every delivered message.
#[derive(Default)]
pub struct RecordingChat {
    sent: Mutex<Vec<(Identity, String)>>,
}

impl RecordingChat {
    /// Create an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delivered (recipient, message) pair, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<(Identity, String)> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Messages delivered to `to`, in order.
    #[must_use]
    pub fn messages_to(&self, to: &Identity) -> Vec<String> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(recipient, _)| recipient == to)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl Chat for RecordingChat {
    async fn send(&self, to: &Identity, message: &str) -> Result<(), ChatError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((to.clone(), message.to_string()));
        Ok(())
    }
}

/// Granter that records calls and returns a scripted outcome.
pub struct ScriptedGranter {
    outcome: Result<(), AccessError>,
    calls: Mutex<Vec<(AccessKind, String, String)>>,
}

impl ScriptedGranter {
    /// Granter whose every execution succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Granter whose every execution fails with `error`.
    #[must_use]
    pub fn failing(error: AccessError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded (kind, repo_url, username) calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(AccessKind, String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl AccessGranter for ScriptedGranter {
    async fn execute(
        &self,
        kind: AccessKind,
        repo_url: &str,
        username: &str,
    ) -> Result<(), AccessError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((kind, repo_url.to_string(), username.to_string()));
        self.outcome.clone()
    }
}
