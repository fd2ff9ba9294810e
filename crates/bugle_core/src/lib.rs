//! Core data types for the Bugle on-call assistant.
//!
//! This crate provides the foundation data types used across all Bugle crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod reply;
mod team;

pub use command::Command;
pub use reply::CommandReply;
pub use team::{Team, User};
