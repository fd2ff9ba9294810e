//! Error types for the Bugle workspace.
//!
//! This crate provides the foundation error types shared across the Bugle crates.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enums define specific error conditions
//! - `*Error` structs wrap the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Domain crates define their own error families in the same shape and map
//! into these foundation types at the edges where needed.
//!
//! # Examples
//!
//! ```
//! use bugle_error::{BugleResult, HttpError};
//!
//! fn fetch_data() -> BugleResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;

pub use config::ConfigError;
pub use error::{BugleError, BugleErrorKind, BugleResult};
pub use http::HttpError;
