//! HTTP boundary and configuration for the Bugle assistant.
//!
//! The chat platform POSTs slash commands to the routes built by
//! [`create_router`]; [`Config`] is the TOML surface the `bugle-server`
//! binary loads at startup to wire the rest of the workspace together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod routes;

pub use config::{
    ChatConfig, CommandConfig, CommandsConfig, Config, OncallConfig, ServerConfig, TimelogConfig,
    TrackerConfig,
};
pub use routes::{AppState, create_router};
