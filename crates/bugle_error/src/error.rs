//! Top-level error wrapper types.

use crate::{ConfigError, HttpError};

/// Foundation error kinds shared across the workspace.
///
/// # Examples
///
/// ```
/// use bugle_error::{BugleError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: BugleError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BugleErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
}

/// Bugle error with kind discrimination.
///
/// The kind is boxed to keep the error itself a single pointer wide.
///
/// # Examples
///
/// ```
/// use bugle_error::{BugleResult, ConfigError};
///
/// fn might_fail() -> BugleResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Bugle Error: {}", _0)]
pub struct BugleError(Box<BugleErrorKind>);

impl BugleError {
    /// Create a new error from a kind.
    pub fn new(kind: BugleErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BugleErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to BugleErrorKind
impl<T> From<T> for BugleError
where
    T: Into<BugleErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Bugle operations.
///
/// # Examples
///
/// ```
/// use bugle_error::{BugleResult, HttpError};
///
/// fn fetch_data() -> BugleResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type BugleResult<T> = std::result::Result<T, BugleError>;
