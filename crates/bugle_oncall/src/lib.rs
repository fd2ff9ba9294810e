//! On-call schedule data for the Bugle assistant.
//!
//! This crate models duty periods, provides the interval algebra used to
//! turn raw provider timelines into presentable assignments, and ships the
//! OpsGenie client implementing the [`DutyProvider`] trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod duty;
mod error;
mod opsgenie;
mod provider;

pub use duty::{DutyPeriod, group_by_user, merge, split_current_and_next};
pub use error::{OncallError, OncallErrorKind, OncallResult};
pub use opsgenie::OpsGenieProvider;
pub use provider::DutyProvider;
