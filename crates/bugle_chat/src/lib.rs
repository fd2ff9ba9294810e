//! Chat delivery for the Bugle assistant.
//!
//! The [`ChatSender`] trait is the seam the rest of the workspace talks
//! through; [`SlackSender`] is the production implementation. Formatting
//! helpers for mentions and greeting names live here too.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod format;
mod sender;
mod slack;

pub use error::{ChatError, ChatErrorKind, ChatResult};
pub use format::{TIMESTAMP_FORMAT, first_name, mention};
pub use sender::ChatSender;
pub use slack::SlackSender;
