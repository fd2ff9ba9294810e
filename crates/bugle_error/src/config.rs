//! Configuration error types.

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// File where the error was raised
    pub file: &'static str,
    /// Line where the error was raised
    pub line: u32,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use bugle_error::ConfigError;
    ///
    /// let err = ConfigError::new("missing field `token`");
    /// assert!(err.message.contains("token"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            file: location.file(),
            line: location.line(),
        }
    }
}

