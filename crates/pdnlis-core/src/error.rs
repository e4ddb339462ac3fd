//! Error types for pdnlis-core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("malformed number: {0:?}")]
    MalformedNumber(String),
}

pub type Result<T> = std::result::Result<T, Error>;
