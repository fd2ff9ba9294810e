//! Error types for worklog lookups.

/// Result type for worklog lookups.
pub type WorklogResult<T> = Result<T, WorklogError>;

/// Error kinds for worklog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum WorklogErrorKind {
    /// Transport-level failure talking to the tracker.
    #[display("HTTP transport error: {_0}")]
    Http(String),

    /// The tracker answered with a non-success status.
    #[display("Tracker API error: status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },
}

/// Worklog lookup error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Worklog error: {} at {}:{}", kind, file, line)]
pub struct WorklogError {
    /// Error kind.
    pub kind: WorklogErrorKind,
    /// File where the error was raised.
    pub file: &'static str,
    /// Line where the error was raised.
    pub line: u32,
}

impl WorklogError {
    /// Create a new worklog error.
    #[track_caller]
    pub fn new(kind: WorklogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            file: location.file(),
            line: location.line(),
        }
    }
}

impl From<reqwest::Error> for WorklogError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(WorklogErrorKind::Http(err.to_string()))
    }
}
