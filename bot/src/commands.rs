//! Chat command grammar.
//!
//! Mirrors the surface the bot registers with the chat framework: a
//! `!gitbot` prefix, two subcommands, a positional access kind and two
//! required flags.

use clap::{Args, Parser, Subcommand};

use gitbot_forge::AccessKind;

/// Prefix that addresses the bot in a chat message.
pub const COMMAND_PREFIX: &str = "!gitbot";

#[derive(Debug, Parser)]
#[command(name = COMMAND_PREFIX, about = "Relay repository access requests")]
pub struct GitbotCommand {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Ask the administrators for repository access
    Request(AccessArgs),
    /// Grant repository access (administrators)
    Grant(AccessArgs),
}

#[derive(Debug, Args)]
pub struct AccessArgs {
    /// Access kind: pull, push or admin
    pub access: AccessKind,

    /// Repository URL
    #[arg(long)]
    pub url: String,

    /// Account that needs the access
    #[arg(long)]
    pub username: String,
}

impl GitbotCommand {
    /// Parse one chat line.
    ///
    /// `None` when the line does not address the bot at all; `Some(Err)`
    /// with the rendered usage error when it does but the arguments are
    /// wrong.
    pub fn parse_line(line: &str) -> Option<Result<Self, String>> {
        let mut tokens = line.split_whitespace();
        if tokens.next()? != COMMAND_PREFIX {
            return None;
        }

        Some(
            Self::try_parse_from(std::iter::once(COMMAND_PREFIX).chain(tokens))
                .map_err(|e| e.to_string()),
        )
    }
}
