// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `HostHarvest` Extract
//!
//! Schema-tolerant extraction for the `HostHarvest` tool.
//!
//! Pages from the listing endpoint follow no fixed schema. This crate turns
//! them into rows without ever failing:
//!
//! - [`locator`] - Finds the record array inside a page
//! - [`harvester`] - Collects hostname strings from a record
//! - [`projector`] - Resolves name and id, and builds a [`Row`]
//! - [`extraction`] - Runs all of the above over every page
//!
//! Every stage only reads its input. Candidate keys and their precedence
//! come from a [`KeySet`].
//!
//! ## Usage
//!
//! ```ignore
//! use hostharvest_core::KeySet;
//! use hostharvest_extract::extract_rows;
//!
//! let extraction = extract_rows(&pages, &KeySet::default());
//! for row in &extraction.rows {
//!     println!("{} -> {}", row.name, row.joined_hosts());
//! }
//! ```

pub mod extraction;
pub mod harvester;
pub mod locator;
pub mod projector;

pub use extraction::{collect_records, extract_rows, ExtractWarning, Extraction};
pub use harvester::harvest;
pub use locator::{locate, locate_with_origin, Located, Origin};
pub use projector::{project, resolve_id, resolve_name};

pub use hostharvest_core::{KeySet, Row};
