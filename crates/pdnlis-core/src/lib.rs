//! Core types for pdnlis.
//!
//! This crate provides the data structures shared by the listing parser and
//! the interconnect graph builder: the engineering-unit normalizer, the
//! per-element [`CircuitEntry`] record, and the ordered [`Directory`] that
//! maps simulator element indices to entries.

pub mod directory;
pub mod entry;
pub mod error;
pub mod units;

pub use directory::Directory;
pub use entry::{CircuitEntry, Electrical, ElementKind};
pub use error::{Error, Result};
pub use units::{format_value, normalize};
