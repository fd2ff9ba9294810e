//! Polling scheduler for recurring jobs.
//!
//! This crate provides a small in-process scheduler. Jobs carry a
//! [`Schedule`] deciding when they fire next; the [`Scheduler`] polls the
//! wall clock and runs whatever came due. The only recurrence rule shipped
//! here is [`EveryWorkingDay`], which fires Monday through Friday at a
//! fixed time of day.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod schedule;
mod scheduler;

pub use error::{ScheduleError, ScheduleErrorKind, ScheduleResult};
pub use schedule::{DayTime, EveryWorkingDay, Schedule};
pub use scheduler::{Job, Scheduler};
