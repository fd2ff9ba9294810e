//! Command processing for the Bugle assistant.
//!
//! Commands arrive from the chat platform, get routed by name through the
//! [`CommandRegistry`], and land in a [`PostponedHandler`] that decides
//! between answering from cache and deferring the work to a background
//! task. The concrete computations behind the two commands are
//! [`DutyTask`] and [`TimelogTask`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod duty;
mod error;
mod handler;
mod postponed;
mod registry;
mod timelog;

pub use duty::DutyTask;
pub use error::{CommandError, CommandErrorKind, CommandResult};
pub use handler::{CommandHandler, CommandTask};
pub use postponed::{PostponedHandler, PostponedHandlerBuilder};
pub use registry::CommandRegistry;
pub use timelog::TimelogTask;
