//! Error type for the end-to-end pipeline.

use thiserror::Error;

/// Result type for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from either stage of the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The listing could not be read or lacks a required section.
    #[error("parse error: {0}")]
    Parse(#[from] pdnlis_parser::Error),

    /// The merged directory could not be turned into a graph.
    #[error("graph error: {0}")]
    Graph(#[from] pdnlis_graph::GraphError),
}
