//! Chat delivery error types.

use derive_getters::Getters;

/// Chat error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChatErrorKind {
    /// Transport-level failure talking to the chat platform.
    #[display("HTTP transport error: {_0}")]
    Http(String),

    /// The platform acknowledged the request but refused it.
    #[display("Slack API error: {_0}")]
    Api(String),
}

/// Chat error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Chat Error: {} at line {} in {}", kind, line, file)]
pub struct ChatError {
    kind: ChatErrorKind,
    line: u32,
    file: &'static str,
}

impl ChatError {
    /// Create a new ChatError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

impl From<reqwest::Error> for ChatError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ChatError::new(ChatErrorKind::Http(err.to_string()))
    }
}
