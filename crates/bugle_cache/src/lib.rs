//! Command reply caching with TTL support.
//!
//! This crate provides the bounded cache that backs postponed command
//! handling, reducing calls to upstream providers for repeated requests.

#![warn(missing_docs)]

mod cache;

pub use cache::TtlCache;
