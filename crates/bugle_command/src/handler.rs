//! Capability seams for the command pipeline.

use crate::CommandResult;
use async_trait::async_trait;
use bugle_core::{Command, CommandReply};

/// Handles one named command end to end.
///
/// The registry routes by name and forwards the command here; whatever
/// the handler returns goes back to the caller verbatim.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Produce the reply for `command`.
    async fn handle(&self, command: &Command) -> CommandResult<CommandReply>;
}

/// The potentially slow computation behind a command.
///
/// Tasks produce plain text and know nothing about caching or delivery;
/// the wrapping handler decides whether the text goes back inline or out
/// through the chat platform.
#[async_trait]
pub trait CommandTask: Send + Sync {
    /// Short name used in logs and error reports.
    fn name(&self) -> &str;

    /// Run the computation for `command`.
    async fn execute(&self, command: &Command) -> CommandResult<String>;
}
