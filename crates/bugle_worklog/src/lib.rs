//! Logged-time lookups for the Bugle assistant.
//!
//! The [`WorklogProvider`] trait answers how much time people logged in a
//! window; [`JiraWorklogs`] implements it against the Jira search API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod jira;
mod provider;
mod worklog;

pub use error::{WorklogError, WorklogErrorKind, WorklogResult};
pub use jira::JiraWorklogs;
pub use provider::WorklogProvider;
pub use worklog::{Worklog, total_seconds_by_author};
