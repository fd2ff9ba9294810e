//! The chat delivery seam.

use crate::ChatResult;
use async_trait::async_trait;

/// Anything that can deliver a text message to a chat destination.
///
/// The destination is either a channel id or an `@login` for a direct
/// message, in the platform's own addressing scheme.
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Deliver `text` to `destination`.
    async fn send_message(&self, destination: &str, text: &str) -> ChatResult<()>;
}
