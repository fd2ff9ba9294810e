//! The daily duty call for the Bugle assistant.
//!
//! [`DutyCallJob`] runs on the scheduler every working day. It fetches the
//! upcoming on-call assignments, reminds each assignee in a direct
//! message, and posts the rota summary to the broadcast channel.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod duty_call;

pub use duty_call::{DutyCallJob, DutyCallJobBuilder};
