//! Error types for the graph builder.

use thiserror::Error;

/// Result type for graph building.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the interconnect graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An instance name does not embed the grid coordinates its kind requires.
    #[error("instance {instance:?} ({kind}) embeds {found} coordinate(s), expected {expected}")]
    CoordinateParse {
        instance: String,
        kind: String,
        expected: usize,
        found: usize,
    },
}
