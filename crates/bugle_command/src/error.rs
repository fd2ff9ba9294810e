//! Error types for command processing.

/// Result type for command processing.
pub type CommandResult<T> = Result<T, CommandError>;

/// Error kinds for command processing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CommandErrorKind {
    /// The token sent with a command did not match the configured one.
    #[display("Unauthorized: invalid token for command {_0:?}")]
    Unauthorized(String),

    /// No handler is registered under the requested name.
    #[display("Unknown command: {_0:?}")]
    UnknownCommand(String),

    /// A second handler was registered under an already taken name.
    #[display("Duplicate command registration: {_0:?}")]
    DuplicateCommand(String),

    /// The computation behind a command reported a failure.
    #[display("Task '{}' failed: {}", task, message)]
    TaskFailed {
        /// Name of the failing task.
        task: String,
        /// What the task reported.
        message: String,
    },
}

/// Command processing error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Command error: {} at {}:{}", kind, file, line)]
pub struct CommandError {
    /// Error kind.
    pub kind: CommandErrorKind,
    /// File where the error was raised.
    pub file: &'static str,
    /// Line where the error was raised.
    pub line: u32,
}

impl CommandError {
    /// Create a new command processing error.
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            file: location.file(),
            line: location.line(),
        }
    }

    /// Wrap a task failure, keeping the task name for the log line.
    #[track_caller]
    pub fn task_failed(task: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::new(CommandErrorKind::TaskFailed {
            task: task.into(),
            message: message.to_string(),
        })
    }
}
