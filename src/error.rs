//! Crate-wide error taxonomy.

use thiserror::Error;

/// Failures surfaced by the tables, sets and network operations.
///
/// The payload names the subject of the failure (a key description, a
/// person's name, a parameter) and is meant for humans only; match on the
/// variant.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// Lookup, delete, unfollow or unlike of something that is not there.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate name, follow or like.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Out-of-range probability, capacity, load factor or clickbait factor.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
