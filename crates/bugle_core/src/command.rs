//! Incoming chat command types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Argument key carrying the channel a reply should be delivered to.
pub const CHANNEL_ARGUMENT: &str = "channel_id";

/// A command received from the chat platform.
///
/// The name arrives without the leading slash. All remaining request
/// fields are carried as string arguments.
///
/// # Examples
///
/// ```
/// use bugle_core::Command;
/// use std::collections::HashMap;
///
/// let command = Command {
///     name: "duty".to_string(),
///     token: "secret".to_string(),
///     arguments: HashMap::from([("channel_id".to_string(), "C123".to_string())]),
/// };
///
/// assert_eq!(command.argument("channel_id"), Some("C123"));
/// assert_eq!(command.reply_channel(), Some("C123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command name, without the leading slash
    pub name: String,
    /// Verification token sent by the chat platform
    pub token: String,
    /// Remaining request fields, keyed by field name
    pub arguments: HashMap<String, String>,
}

impl Command {
    /// Create a command with no arguments.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            arguments: HashMap::new(),
        }
    }

    /// Look up an argument by key.
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }

    /// The channel the reply should be delivered to, when the platform sent one.
    pub fn reply_channel(&self) -> Option<&str> {
        self.argument(CHANNEL_ARGUMENT)
    }
}
