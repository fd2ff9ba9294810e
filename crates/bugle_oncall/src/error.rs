//! Error types for on-call provider operations.

/// Result type for on-call provider operations.
pub type OncallResult<T> = Result<T, OncallError>;

/// Error kinds for on-call provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OncallErrorKind {
    /// Transport-level failure talking to the provider.
    #[display("HTTP transport error: {_0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[display("OpsGenie API error: status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },
}

/// On-call provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("On-call error: {} at {}:{}", kind, file, line)]
pub struct OncallError {
    /// Error kind.
    pub kind: OncallErrorKind,
    /// File where the error was raised.
    pub file: &'static str,
    /// Line where the error was raised.
    pub line: u32,
}

impl OncallError {
    /// Create a new on-call error.
    #[track_caller]
    pub fn new(kind: OncallErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            file: location.file(),
            line: location.line(),
        }
    }
}

impl From<reqwest::Error> for OncallError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(OncallErrorKind::Http(err.to_string()))
    }
}
