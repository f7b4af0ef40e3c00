//! CLI command implementations.

pub mod config;
pub mod diff;
pub mod fetch;
pub mod parse;
