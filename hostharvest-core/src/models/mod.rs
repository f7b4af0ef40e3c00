//! Domain models for `HostHarvest`.
//!
//! ## Submodules
//!
//! - [`row`] - The flattened export row and its ordering rules
//!
//! Pages and records are plain JSON values: the upstream schema is not
//! fixed, so nothing is deserialized into typed structs before extraction.

pub mod row;

use serde_json::{Map, Value};

pub use row::{sort_rows, Row, HOST_SEPARATOR};

/// One raw JSON document returned by one fetch call.
///
/// Either a sequence of records or an object containing one somewhere.
pub type Page = Value;

/// One application/resource entry. Any key may be absent or of any type.
pub type Record = Map<String, Value>;
