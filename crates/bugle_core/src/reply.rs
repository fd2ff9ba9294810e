//! Command reply types.

use serde::{Deserialize, Serialize};

/// The outcome of handling a command.
///
/// A reply is either immediate text, or a marker that the work continues
/// in the background and the text will be delivered to the chat later.
///
/// # Examples
///
/// ```
/// use bugle_core::CommandReply;
///
/// let reply = CommandReply::text("On duty: alice");
/// assert_eq!(reply.text, "On duty: alice");
/// assert!(!reply.postponed);
///
/// let postponed = CommandReply::postponed();
/// assert!(postponed.postponed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    /// Text to return to the requester, empty for postponed replies
    pub text: String,
    /// Whether the answer will arrive later through the chat platform
    pub postponed: bool,
}

impl CommandReply {
    /// An immediate text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            postponed: false,
        }
    }

    /// A reply that will be delivered later.
    pub fn postponed() -> Self {
        Self {
            text: String::new(),
            postponed: true,
        }
    }
}
