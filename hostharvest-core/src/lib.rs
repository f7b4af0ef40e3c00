// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `HostHarvest` Core
//!
//! Core types, candidate key lists, and configuration for the `HostHarvest`
//! tool.
//!
//! This crate provides the foundational pieces shared by the fetch,
//! extraction, and CLI crates:
//!
//! - Domain models (pages, records, rows)
//! - Ordered candidate key lists and the first-match helper
//! - Text normalization for names and host candidates
//! - The run configuration and its loader
//! - Error types
//!
//! ## Key Types
//!
//! - [`Page`] - One raw JSON document returned by one fetch
//! - [`Record`] - One application entry inside a page
//! - [`Row`] - The flattened export unit (name, hosts, id)
//! - [`KeySet`] - Ordered candidate keys for every lookup
//! - [`HarvestConfig`] - Run configuration with documented defaults

pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod normalize;

// Re-export error types
pub use error::CoreError;

// Re-export configuration
pub use config::{CursorPath, HarvestConfig, PerPageParam};

// Re-export key handling
pub use keys::{first_entry, first_match, KeySet};

// Re-export model types
pub use models::{sort_rows, Page, Record, Row, HOST_SEPARATOR};

pub use normalize::normalize_text;
