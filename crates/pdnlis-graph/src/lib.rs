//! Interconnect graph reconstruction for pdnlis.
//!
//! This crate turns an enriched circuit directory into a typed, 3-D
//! coordinate-addressed graph of the power-delivery network:
//! - resistive edges and vias, each between two grid nodes
//! - TSVs and micro-bumps, each anchored at one grid node and extended to a
//!   synthetic endpoint just outside the stack
//!
//! Layer indices are inverted so that layer 0 is the top of the stack.

pub mod builder;
pub mod coord;
pub mod error;
pub mod summary;

pub use builder::{
    Anchors, Extraction, Interconnect, InterconnectKind, PdnGraph, Span, TSV_TOP_Z, UBUMP_OFFSET,
    build_graph, extract,
};
pub use coord::{Coordinate, Point3, decode_coordinates};
pub use error::{Error as GraphError, Result as GraphResult};
pub use summary::GraphSummary;
